//! Terminal output helpers.
//!
//! Status messages and human-readable formatting. Color support is detected
//! once from the environment and the terminal.
//!
//! # Examples
//!
//! ```no_run
//! use cssbundle_cli::ui;
//!
//! ui::init_colors();
//! ui::success("build/bundle.css  1.20 KB  (4ms)");
//! ```

mod format;
mod messages;

use std::sync::OnceLock;

pub use format::{format_duration, format_size};
pub use messages::success;

static COLOR: OnceLock<bool> = OnceLock::new();

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// Call once at startup; the decision is kept for the rest of the process.
pub fn init_colors() {
    COLOR.get_or_init(should_use_color);
}

/// Whether status messages are colored
pub fn colors_enabled() -> bool {
    *COLOR.get_or_init(should_use_color)
}

//! Logging infrastructure for the cssbundle CLI.
//!
//! Structured logging via `tracing`. The configured [`LogLevel`] sets the
//! default filter for the cssbundle crates; `RUST_LOG` overrides it.
//!
//! # Example
//!
//! ```rust,no_run
//! use cssbundle::LogLevel;
//! use cssbundle_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(LogLevel::Info, false);
//!
//! info!("Starting build");
//! ```

use cssbundle::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for `level`.
pub fn default_filter(level: LogLevel) -> String {
    let level = level.as_filter();
    format!("cssbundle={level},cssbundle_cli={level}")
}

/// Initialize the tracing subscriber.
///
/// Should be called once, before any logging occurs. Later calls are
/// ignored.
///
/// # Arguments
///
/// * `level` - Verbosity for the cssbundle crates when `RUST_LOG` is unset
/// * `no_color` - Disable colored output
pub fn init_logger(level: LogLevel, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false) // Don't show the module path (keeps output clean)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

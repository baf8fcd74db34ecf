//! The fixed build configuration.
//!
//! Every invocation builds exactly these options; nothing here is read from
//! arguments, files, or the environment.

use cssbundle::{BuildOptions, LogLevel};

/// Stylesheet the build starts from
pub const ENTRY_POINT: &str = "src/app.css";

/// `package.json` fields consulted, in order, for package imports
pub const MAIN_FIELDS: [&str; 3] = ["browser", "module", "main"];

/// Inline all transitively imported stylesheets
pub const BUNDLE: bool = true;

/// Minify the output
pub const MINIFY: bool = true;

/// Where the compiled stylesheet is written
pub const OUTFILE: &str = "build/bundle.css";

/// Verbosity of informational output
pub const LOG_LEVEL: LogLevel = LogLevel::Info;

/// Assemble the fixed configuration.
pub fn build_options() -> BuildOptions {
    BuildOptions::new(ENTRY_POINT, OUTFILE)
        .with_main_fields(MAIN_FIELDS)
        .with_bundle(BUNDLE)
        .with_minify(MINIFY)
        .with_log_level(LOG_LEVEL)
}

//! Build configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Verbosity of informational output during a build.
///
/// Levels are ordered, so `level >= LogLevel::Info` reads as "info output is
/// enabled".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings
    Warning,
    /// Errors, warnings, and info (default)
    #[default]
    Info,
    /// All logs including debug
    Debug,
}

impl LogLevel {
    /// Convert to a tracing filter directive
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Silent => "silent",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Configuration for a single CSS build.
///
/// Describes where the entry point is, how bare `@import` specifiers pick a
/// file out of a package, whether imports are inlined, whether the output is
/// minified, and where the result is written.
///
/// # Example
///
/// ```rust
/// use cssbundle::{BuildOptions, LogLevel};
///
/// let options = BuildOptions::new("src/app.css", "build/bundle.css")
///     .with_main_fields(["browser", "module", "main"])
///     .with_bundle(true)
///     .with_minify(true)
///     .with_log_level(LogLevel::Info);
///
/// assert_eq!(options.main_fields, vec!["browser", "module", "main"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Stylesheet the build starts from
    pub entry_point: PathBuf,

    /// `package.json` fields consulted, in order, when an `@import` names a
    /// package instead of a file
    pub main_fields: Vec<String>,

    /// Inline every transitively imported stylesheet into the output
    pub bundle: bool,

    /// Compress the output (merge rules, shorthands, drop whitespace)
    pub minify: bool,

    /// Destination file for the compiled stylesheet
    pub outfile: PathBuf,

    /// Verbosity of informational output
    pub log_level: LogLevel,
}

impl BuildOptions {
    /// Create options for `entry_point` written to `outfile`.
    ///
    /// Bundling is on, minification is off, and `main_fields` falls back to
    /// `["main"]` until set.
    pub fn new(entry_point: impl Into<PathBuf>, outfile: impl Into<PathBuf>) -> Self {
        Self {
            entry_point: entry_point.into(),
            main_fields: vec!["main".to_string()],
            bundle: true,
            minify: false,
            outfile: outfile.into(),
            log_level: LogLevel::default(),
        }
    }

    /// Set the resolution field priority
    pub fn with_main_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable `@import` inlining
    pub fn with_bundle(mut self, enabled: bool) -> Self {
        self.bundle = enabled;
        self
    }

    /// Enable or disable minification
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Resolve the entry point and output file against `cwd`.
    ///
    /// Absolute paths are kept as they are.
    pub fn relative_to(mut self, cwd: &Path) -> Self {
        if self.entry_point.is_relative() {
            self.entry_point = cwd.join(&self.entry_point);
        }
        if self.outfile.is_relative() {
            self.outfile = cwd.join(&self.outfile);
        }
        self
    }
}

//! Error type for the CLI and the failure report.
//!
//! A failed run is reported once, by [`report`], under the fixed
//! [`FAILURE_LABEL`]. The caller then exits with status 1.

use cssbundle::{BuildError, Location};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, SourceCode};
use owo_colors::OwoColorize;
use std::fmt;
use thiserror::Error;

/// Prefix of every failure report on stderr
pub const FAILURE_LABEL: &str = "Errors:";

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The bundler rejected the build
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl CliError {
    /// Position reported by the bundler, if any
    pub fn location(&self) -> Option<&Location> {
        match self {
            CliError::Build(e) => e.location(),
        }
    }

    /// Underlying diagnostic, when there is one to render
    fn diagnostic(&self) -> &dyn Diagnostic {
        match self {
            CliError::Build(e) => e,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Render the failure report as plain text.
///
/// The report starts with the label. When the source file could be read the
/// label stands alone and the snippet follows, headed by the message and
/// position. Otherwise the message follows the label, with a `-->` line when
/// a location is known.
pub fn render(err: &CliError, color: bool) -> String {
    let label = if color {
        FAILURE_LABEL.red().bold().to_string()
    } else {
        FAILURE_LABEL.to_string()
    };

    if let Some(snippet) = render_snippet(err.diagnostic(), color) {
        return format!("{}\n{}", label, snippet);
    }

    let mut out = format!("{} {}\n", label, err);
    if let Some(location) = err.location() {
        out.push_str(&format!("  --> {}\n", location));
    }
    out
}

fn render_snippet(diagnostic: &dyn Diagnostic, color: bool) -> Option<String> {
    diagnostic.source_code()?;

    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut rendered = String::new();
    GraphicalReportHandler::new_themed(theme)
        .render_report(&mut rendered, &Snippet(diagnostic))
        .ok()?;
    Some(rendered)
}

/// A diagnostic shown without its code line.
#[derive(Debug)]
struct Snippet<'a>(&'a dyn Diagnostic);

impl fmt::Display for Snippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for Snippet<'_> {}

impl Diagnostic for Snippet<'_> {
    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.0.source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.0.labels()
    }
}

/// Print the failure report to stderr.
pub fn report(err: &CliError) {
    eprint!("{}", render(err, crate::ui::colors_enabled()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssbundle::Phase;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_without_location() {
        let err: CliError = BuildError::new(Phase::Resolve, "Could not read src/app.css").into();
        let out = render(&err, false);

        assert!(out.starts_with("Errors: Could not read src/app.css\n"));
        assert!(!out.contains("-->"));
    }

    #[test]
    fn test_render_with_location_and_snippet() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.css");
        fs::write(&file, "a { color: red }\n??? { top: 0 }\n").unwrap();

        let err: CliError = BuildError::new(Phase::Parse, "Unexpected token")
            .with_location(Location {
                file: file.to_string_lossy().into_owned(),
                line: 2,
                column: 1,
            })
            .into();
        let out = render(&err, false);

        assert!(out.starts_with("Errors:\n"));
        assert_eq!(out.matches("Unexpected token").count(), 1);
        assert!(out.contains(&format!("{}:2:1", file.display())));
        assert!(out.contains("???"));
        assert!(!out.contains("cssbundle::parse"));
    }

    #[test]
    fn test_render_location_without_snippet() {
        let err: CliError = BuildError::new(Phase::Parse, "Unexpected token")
            .with_location(Location {
                file: "/definitely/not/here.css".to_string(),
                line: 4,
                column: 2,
            })
            .into();
        let out = render(&err, false);

        assert_eq!(
            out,
            "Errors: Unexpected token\n  --> /definitely/not/here.css:4:2\n"
        );
    }
}

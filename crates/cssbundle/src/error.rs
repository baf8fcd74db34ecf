//! Build failure type.
//!
//! Every way a build can fail surfaces as a [`BuildError`]: a message, the
//! [`Phase`] that produced it, and an optional [`Location`] when the CSS
//! library reported one. Callers are not expected to branch on the phase; it
//! only feeds the diagnostic code and help text.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Result type alias using `BuildError` as the default error type.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Step of the build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Locating or reading a stylesheet
    Resolve,
    /// Parsing CSS syntax
    Parse,
    /// Optimizing the parsed stylesheet
    Minify,
    /// Serializing the stylesheet back to CSS
    Print,
    /// Writing the output file
    Write,
    /// The build task itself could not complete
    Internal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Resolve => "resolve",
            Phase::Parse => "parse",
            Phase::Minify => "minify",
            Phase::Print => "print",
            Phase::Write => "write",
            Phase::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Position in a source file, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl From<lightningcss::error::ErrorLocation> for Location {
    fn from(loc: lightningcss::error::ErrorLocation) -> Self {
        // lightningcss counts lines from 0 and columns from 1
        Self {
            file: loc.filename,
            line: loc.line + 1,
            column: loc.column,
        }
    }
}

/// A failed build.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BuildError {
    phase: Phase,
    message: String,
    location: Option<Location>,
    source_code: Option<NamedSource<String>>,
}

impl BuildError {
    /// Create an error without positional data
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
            location: None,
            source_code: None,
        }
    }

    /// Convert an error reported by lightningcss, keeping its location.
    pub fn from_css<T: fmt::Display>(phase: Phase, err: lightningcss::error::Error<T>) -> Self {
        let error = Self::new(phase, err.kind.to_string());
        match err.loc {
            Some(loc) => error.with_location(loc.into()),
            None => error,
        }
    }

    /// Attach a location.
    ///
    /// The referenced file is read so the diagnostic can show a snippet; if it
    /// cannot be read the location is kept without one.
    pub fn with_location(mut self, location: Location) -> Self {
        self.source_code = std::fs::read_to_string(Path::new(&location.file))
            .ok()
            .map(|source| NamedSource::new(&location.file, source));
        self.location = Some(location);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl Diagnostic for BuildError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("cssbundle::{}", self.phase)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let hint = match self.phase {
            Phase::Resolve => "check that the file exists and that package imports are installed",
            Phase::Parse => "fix the CSS syntax at the reported position",
            Phase::Write => "check that the output directory is writable",
            Phase::Minify | Phase::Print | Phase::Internal => return None,
        };
        Some(Box::new(hint))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code.as_ref().map(|s| s as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let location = self.location.as_ref()?;
        let source = self.source_code.as_ref()?.inner();
        let offset = line_col_to_offset(source, location.line, location.column)?;
        let (offset, len) = label_span(source, offset);
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(self.phase.to_string()),
            offset,
            len,
        ))))
    }
}

/// Convert a 1-based line and column to a byte offset
pub(crate) fn line_col_to_offset(source: &str, line: u32, column: u32) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line as usize {
            let col = column.saturating_sub(1) as usize;
            let in_line = text
                .char_indices()
                .nth(col)
                .map(|(pos, _)| pos)
                .unwrap_or(text.trim_end_matches('\n').len());
            return Some(offset + in_line);
        }
        offset += text.len();
    }

    // The line after the last newline is end of input
    let lines = source.split_inclusive('\n').count();
    (line as usize == lines + 1 && (source.is_empty() || source.ends_with('\n')))
        .then_some(source.len())
}

/// Span to underline for an error at `offset`, kept inside the source.
///
/// Errors at end of input point at the last visible character.
fn label_span(source: &str, offset: usize) -> (usize, usize) {
    if offset < source.len() {
        return (offset, token_len(source, offset));
    }

    match source.trim_end().char_indices().next_back() {
        Some((pos, c)) => (pos, c.len_utf8()),
        None => (0, 0),
    }
}

/// Length of the token starting at `offset`, at least one byte unless the
/// offset is at end of input
fn token_len(source: &str, offset: usize) -> usize {
    let Some(rest) = source.get(offset..) else {
        return 0;
    };

    rest.char_indices()
        .find(|(_, c)| c.is_whitespace() || matches!(c, '{' | '}' | ';'))
        .map(|(pos, _)| pos)
        .unwrap_or(rest.len())
        .max(1)
        .min(rest.len())
}

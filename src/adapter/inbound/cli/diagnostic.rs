//! Miette-based error diagnostics for CLI error presentation.
//!
//! Renders configuration file problems with source context, a labeled
//! span, and a help suggestion instead of a bare parser message.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(plateful::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Content of the configuration file.
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a new configuration diagnostic with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the diagnostic.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build a rich report for a TOML parse failure.
///
/// Returns `None` when the file cannot be re-read or the parser did not
/// attach a span; callers fall back to plain error output.
pub fn config_parse_report(path: &Path, err: &toml::de::Error) -> Option<miette::Report> {
    let src = std::fs::read_to_string(path).ok()?;
    let span = err.span()?;
    let len = span.end.saturating_sub(span.start).max(1);

    let diagnostic = ConfigDiagnostic::new(err.message().to_string(), src, span.start, len)
        .with_help(format!("check the TOML syntax in {}", path.display()));
    Some(miette::Report::new(diagnostic))
}

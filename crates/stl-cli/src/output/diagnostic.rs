//! Miette diagnostic wrapper for tag parse errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use stl::ParseError;
use thiserror::Error;

/// A miette-compatible diagnostic pointing into the tag markup.
///
/// Fields are read by the miette derive, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid tag: {message}")]
#[diagnostic(code(stl::syntax))]
pub struct StlDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl StlDiagnostic {
    /// Create a diagnostic for `markup` from the error `parse_tag` returned.
    ///
    /// Positions refer to the trimmed markup, so that is what gets shown.
    pub fn from_parse_error(name: &str, markup: &str, err: &ParseError) -> Self {
        let content = markup.trim();
        let (line, column, message, help) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (
                *line,
                *column,
                message.clone(),
                Some("tags look like <stl:name key=\"value\" /> or <stl:name>...</stl:name>".to_string()),
            ),
            ParseError::UnexpectedEof {
                line,
                column,
                name,
            } => (
                *line,
                *column,
                format!("'{name}' is never closed"),
                Some(format!("add </{name}> or write the tag as <{name} ... />")),
            ),
        };

        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);
        let offset = offset.min(content.len().saturating_sub(1));

        StlDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}

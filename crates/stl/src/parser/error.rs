//! Parse error types for STL markup.

use thiserror::Error;

/// An error that occurred while parsing a tag occurrence.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The element was opened but its closing tag is missing.
    #[error("unexpected end of input at {line}:{column}: expected '</{name}>'")]
    UnexpectedEof {
        line: usize,
        column: usize,
        name: String,
    },
}

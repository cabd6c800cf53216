//! Error types for the STL engine.
//!
//! Only infrastructure failures escape a render. Malformed attributes,
//! unresolvable entities and unknown names degrade to empty or unchanged
//! output instead of producing errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failure reported by a [`SiteRepository`](crate::SiteRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("repository unavailable: {message}")]
    Unavailable { message: String },

    /// A stored record could not be decoded.
    #[error("{entity} {id} is corrupt: {message}")]
    Corrupt {
        entity: &'static str,
        id: i64,
        message: String,
    },
}

/// An error that aborts the rendering of a tag.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Repository failure; surfaced to the page-render layer as a hard failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Nested evaluation went deeper than the configured bound.
    ///
    /// Raised by [`RenderContext::nested`](crate::RenderContext::nested) and
    /// absorbed by entity substitution, which renders that one marker as
    /// empty text.
    #[error("maximum tag nesting depth ({max_depth}) exceeded")]
    MaxDepthExceeded { max_depth: usize },
}

/// Errors that occur while loading configuration or site fixtures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error when reading a configuration file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML syntax or schema error.
    #[error("invalid configuration in {origin}: {message}")]
    Parse { origin: String, message: String },
}

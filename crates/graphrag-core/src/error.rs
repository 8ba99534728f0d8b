//! Error types for graphrag-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for graphrag-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in graphrag-core and the crates built on it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure, optionally tied to a filesystem path.
    #[error("I/O error{}: {source}", .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        /// Path involved in the failed operation, if known.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// A named item could not be found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of item (e.g. "node").
        kind: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A generic operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given item kind and id.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates an operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation(message.into())
    }

    /// Wraps an I/O error without path context.
    pub fn io(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }

    /// Wraps an I/O error together with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::io(source)
    }
}

//! Error types for graphrag-cli

use thiserror::Error;

/// Result type alias for graphrag-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in graphrag-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from graphrag-core
    #[error("Core error: {0}")]
    Core(#[from] graphrag_core::Error),

    /// Error from the query engine
    #[error(transparent)]
    Engine(#[from] graphrag_query::Error),

    /// No graph has been indexed yet.
    #[error("No graph found at {0}. Run `graphrag index <DIR>` first.")]
    NoGraph(String),
}

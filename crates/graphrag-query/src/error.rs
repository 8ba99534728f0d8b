//! Error types for graphrag-query

use thiserror::Error;

/// Result type alias for graphrag-query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a [`GraphQueryEngine`](crate::GraphQueryEngine).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The backing graph store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A document or record could not be mapped to the graph schema.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The question or options could not be turned into a graph query.
    #[error("Query translation error: {0}")]
    QueryTranslation(String),

    /// The graph query failed while running.
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// Error from graphrag-core
    #[error("Core error: {0}")]
    Core(#[from] graphrag_core::Error),
}

impl Error {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a query translation error.
    pub fn translation(message: impl Into<String>) -> Self {
        Self::QueryTranslation(message.into())
    }

    /// Create a query execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::QueryExecution(message.into())
    }
}

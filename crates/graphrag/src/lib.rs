//! GraphRAG umbrella crate.
//!
//! Re-exports the GraphRAG components. Use feature flags to pick what you
//! need; `query` (the default) pulls in the graph layer as well.

#![doc = include_str!("../README.md")]

pub use graphrag_core as core;

#[cfg(feature = "graph")]
pub use graphrag_graph as graph;

#[cfg(feature = "query")]
pub use graphrag_query as query;

#[cfg(feature = "query")]
pub use graphrag_query::{GraphQueryEngine, GraphRagEngine, QueryResult};

#[cfg(feature = "cli")]
pub use graphrag_cli as cli;

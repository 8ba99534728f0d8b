//! Knowledge graph infrastructure for GraphRAG.
//!
//! This crate turns documents into a petgraph-backed knowledge graph and
//! provides the pieces retrieval needs on top of it.
//!
//! # Modules
//!
//! - [`types`]: Nodes, edges, relationships, and `GraphData`
//! - [`extractor`]: `GraphExtractor` trait and the capitalized-phrase `EntityExtractor`
//! - [`builder`]: Two-phase `GraphBuilder` with dedup and dangling-ref tracking
//! - [`stopwords`]: Tokenization and stopword filtering
//! - [`index`]: Inverted `TermIndex` for seed lookup
//! - [`algorithms`]: Neighborhood BFS and graph statistics
//! - [`store`]: `GraphStore` trait with memory and JSON file backends
//!
//! # Example
//!
//! ```rust
//! use graphrag_core::Document;
//! use graphrag_graph::{EntityExtractor, GraphBuilder, TermIndex, stopwords::StopwordFilter};
//!
//! let docs = vec![Document::new("notes", "Ada Lovelace annotated Babbage's engine.")];
//! let (graph, _stats) = GraphBuilder::new(EntityExtractor::default())
//!     .build(&docs)
//!     .unwrap();
//!
//! let index = TermIndex::build(&graph, &StopwordFilter::default());
//! let seeds = index.lookup(&["lovelace".to_string()]);
//! assert_eq!(seeds[0].node_id, "entity:ada-lovelace");
//! ```

pub mod algorithms;
pub mod builder;
pub mod extractor;
pub mod index;
pub mod stopwords;
pub mod store;
pub mod types;

// Re-export key types
pub use algorithms::{
    GraphStats, MAX_BFS_DEPTH, NeighborhoodResult, TraversalPath, compute_stats, neighborhood,
};
pub use builder::{BuildError, BuildStats, ErrorHandling, GraphBuilder, add_edge_tracked};
pub use extractor::{EntityExtractor, Extraction, GraphExtractor};
pub use index::{SeedMatch, TermField, TermIndex};
pub use stopwords::TextConfig;
pub use store::{FileStore, GraphStore, MemoryStore};
pub use types::{Edge, EdgeOrigin, GraphData, GraphSnapshot, Node, NodeKind, Relationship};

//! Graph-backed retrieval query engine.
//!
//! This crate defines the engine contract and its reference backend:
//!
//! - [`GraphQueryEngine`]: `init_db`, `add_records`, `query`
//! - [`QueryResult`] / [`Evidence`]: what a query returns
//! - [`QueryOptions`]: typed view of the open option map
//! - [`Record`]: input to `add_records`
//! - [`GraphRagEngine`]: petgraph-backed implementation over any
//!   [`GraphStore`](graphrag_graph::GraphStore)
//!
//! Question translation and answer composition sit behind the
//! [`QueryTranslator`] and [`AnswerComposer`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphrag_graph::FileStore;
//! use graphrag_query::{GraphQueryEngine, GraphRagEngine};
//!
//! let engine = GraphRagEngine::new(Arc::new(FileStore::new("graph.json")));
//! engine.init_db(Some(&documents)).await?;
//!
//! let options = serde_json::json!({"max_hops": 2}).as_object().cloned().unwrap();
//! let result = engine.query("Who worked with Babbage?", 5, &options).await?;
//! for item in result.results() {
//!     println!("{:.3} {}", item.score(), item.key());
//! }
//! ```

pub mod answer;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod options;
pub mod record;
pub mod result;
pub mod retrieve;
pub mod translate;

// Re-exports
pub use answer::{AnswerComposer, TemplateComposer};
pub use backend::{GraphRagEngine, IndexedGraph};
pub use config::EngineConfig;
pub use engine::GraphQueryEngine;
pub use error::{Error, Result};
pub use options::{AnswerMode, QueryOptions};
pub use record::{EdgeRecord, NodeRecord, Record};
pub use result::{Evidence, QueryResult};
pub use translate::{GraphQuery, KeywordTranslator, QueryTranslator};

//! The graph query engine contract.

use crate::error::Result;
use crate::record::Record;
use crate::result::QueryResult;
use async_trait::async_trait;
use graphrag_core::Document;
use serde_json::{Map, Value};

/// A retrieval engine backed by a knowledge graph.
///
/// Implementations are created by the host, made ready with
/// [`init_db`](Self::init_db), optionally extended with
/// [`add_records`](Self::add_records), and then queried. The contract
/// makes no scheduling promises; implementations document their own
/// concurrency guarantees.
#[async_trait]
pub trait GraphQueryEngine: Send + Sync {
    /// Initialize (or reset) the graph from an optional document list.
    ///
    /// `None` or an empty slice yields an empty, queryable graph.
    ///
    /// # Errors
    ///
    /// `Connection` if the store is unreachable, `Schema` if a document
    /// cannot be mapped to the graph.
    async fn init_db(&self, documents: Option<&[Document]>) -> Result<()>;

    /// Add records to an initialized graph.
    ///
    /// Returns `true` if the records were incorporated, `false` otherwise.
    /// An empty batch returns `true` and changes nothing.
    async fn add_records(&self, records: &[Record]) -> bool;

    /// Answer a question with at most `n_results` evidence items.
    ///
    /// # Errors
    ///
    /// `QueryTranslation` for an empty question, `n_results == 0`, or
    /// invalid options; `QueryExecution` if the engine is not usable.
    async fn query(
        &self,
        question: &str,
        n_results: usize,
        options: &Map<String, Value>,
    ) -> Result<QueryResult>;

    /// Query with one result and default options.
    async fn ask(&self, question: &str) -> Result<QueryResult> {
        self.query(question, 1, &Map::new()).await
    }
}

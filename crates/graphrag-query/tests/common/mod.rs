//! Common test utilities for engine integration tests.

use async_trait::async_trait;
use graphrag_core::{Document, Error, Result};
use graphrag_graph::{GraphData, GraphStore, MemoryStore};
use graphrag_query::GraphRagEngine;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Document A of the sample corpus.
pub fn doc_a() -> Document {
    Document::new(
        "doc-a",
        "Ada Lovelace wrote the first algorithm for the Analytical Engine.",
    )
    .with_title("Lovelace Notes")
}

/// Document B of the sample corpus.
pub fn doc_b() -> Document {
    Document::new(
        "doc-b",
        "Charles Babbage designed the Analytical Engine in London.",
    )
}

/// Document C, added incrementally in several tests.
pub fn doc_c() -> Document {
    Document::new("doc-c", "Grace Hopper built the first compiler at Harvard.")
}

/// Engine over a fresh in-memory store.
pub fn memory_engine() -> GraphRagEngine {
    GraphRagEngine::new(Arc::new(MemoryStore::new()))
}

/// Engine initialized with documents A and B.
pub async fn seeded_engine() -> GraphRagEngine {
    let engine = memory_engine();
    engine
        .init_db_with_stats(Some(&[doc_a(), doc_b()]))
        .await
        .expect("init should succeed");
    engine
}

/// Build an options map from a JSON object literal.
pub fn options(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("options must be an object")
}

/// Store that can never be reached.
pub struct OfflineStore;

#[async_trait]
impl GraphStore for OfflineStore {
    fn name(&self) -> &str {
        "offline"
    }

    async fn connect(&self) -> Result<()> {
        Err(Error::operation("connection refused"))
    }

    async fn load(&self) -> Result<Option<GraphData>> {
        Err(Error::operation("connection refused"))
    }

    async fn commit(&self, _graph: &GraphData) -> Result<()> {
        Err(Error::operation("connection refused"))
    }
}

/// Memory store whose commits can be switched off.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_commits: AtomicBool,
}

impl FlakyStore {
    /// Make every later commit fail.
    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl GraphStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn connect(&self) -> Result<()> {
        self.inner.connect().await
    }

    async fn load(&self) -> Result<Option<GraphData>> {
        self.inner.load().await
    }

    async fn commit(&self, graph: &GraphData) -> Result<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(Error::operation("disk full"));
        }
        self.inner.commit(graph).await
    }
}

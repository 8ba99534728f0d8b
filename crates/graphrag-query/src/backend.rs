//! `GraphRagEngine`: the reference [`GraphQueryEngine`] backend.
//!
//! The engine publishes an immutable [`IndexedGraph`] behind an
//! `Arc`. Queries clone the `Arc` and run without holding any lock.
//! Mutations are serialized by a writer mutex: each one builds a new
//! graph off to the side, commits it to the [`GraphStore`], and only then
//! swaps the published pointer. A query therefore sees the graph from
//! before or after a mutation, never one in between.
//!
//! # Example
//!
//! ```rust
//! use graphrag_core::Document;
//! use graphrag_graph::MemoryStore;
//! use graphrag_query::{GraphQueryEngine, GraphRagEngine};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let engine = GraphRagEngine::new(Arc::new(MemoryStore::new()));
//! let docs = [Document::new("ada", "Ada Lovelace worked with Charles Babbage.")];
//! engine.init_db(Some(&docs)).await.unwrap();
//!
//! let result = engine.ask("Who is Lovelace?").await.unwrap();
//! assert_eq!(result.results().len(), 1);
//! assert!(result.answer().unwrap().contains("Ada Lovelace"));
//! # });
//! ```

use crate::answer::{AnswerComposer, TemplateComposer};
use crate::config::EngineConfig;
use crate::engine::GraphQueryEngine;
use crate::error::{Error, Result};
use crate::options::AnswerMode;
use crate::record::{Record, apply_records};
use crate::result::QueryResult;
use crate::retrieve::retrieve;
use crate::translate::{KeywordTranslator, QueryTranslator};
use async_trait::async_trait;
use graphrag_core::{Document, ServiceHandle, ServiceState};
use graphrag_graph::stopwords::StopwordFilter;
use graphrag_graph::{
    BuildStats, EntityExtractor, ErrorHandling, GraphBuilder, GraphData, GraphExtractor,
    GraphStats, GraphStore, TermIndex, compute_stats,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

// ============================================================================
// IndexedGraph
// ============================================================================

/// A published graph together with its term index.
#[derive(Debug)]
pub struct IndexedGraph {
    /// The graph.
    pub graph: GraphData,
    /// Term index over the graph's nodes.
    pub index: TermIndex,
}

impl IndexedGraph {
    /// Index a graph.
    pub fn new(graph: GraphData, filter: &StopwordFilter) -> Self {
        let index = TermIndex::build(&graph, filter);
        Self { graph, index }
    }
}

// ============================================================================
// GraphRagEngine
// ============================================================================

/// Graph-backed retrieval engine.
pub struct GraphRagEngine {
    config: EngineConfig,
    handle: ServiceHandle,
    store: Arc<dyn GraphStore>,
    extractor: Arc<dyn GraphExtractor>,
    translator: Box<dyn QueryTranslator>,
    composer: Box<dyn AnswerComposer>,
    filter: StopwordFilter,
    current: RwLock<Option<Arc<IndexedGraph>>>,
    writer: Mutex<()>,
}

impl GraphRagEngine {
    /// Create an engine with default configuration over a store.
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(store: Arc<dyn GraphStore>, config: EngineConfig) -> Self {
        let extractor =
            EntityExtractor::new(&config.text).with_max_entity_words(config.max_entity_words);
        Self {
            handle: ServiceHandle::new(config.name.clone()),
            store,
            extractor: Arc::new(extractor),
            translator: Box::new(KeywordTranslator::new(&config.text)),
            composer: Box::new(TemplateComposer::new()),
            filter: StopwordFilter::new(&config.text),
            current: RwLock::new(None),
            writer: Mutex::new(()),
            config,
        }
    }

    /// Replace the graph extractor.
    pub fn with_extractor(mut self, extractor: impl GraphExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Replace the question translator.
    pub fn with_translator(mut self, translator: impl QueryTranslator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Replace the answer composer.
    pub fn with_composer(mut self, composer: impl AnswerComposer + 'static) -> Self {
        self.composer = Box::new(composer);
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifecycle handle; subscribe to observe state transitions.
    pub fn handle(&self) -> &ServiceHandle {
        &self.handle
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.handle.state()
    }

    /// The currently published graph, if any.
    pub async fn snapshot(&self) -> Option<Arc<IndexedGraph>> {
        self.current.read().await.clone()
    }

    /// Statistics for the published graph.
    pub async fn stats(&self) -> Option<GraphStats> {
        self.snapshot().await.map(|s| compute_stats(&s.graph))
    }

    /// Initialize from documents, returning build statistics.
    ///
    /// Same semantics as [`GraphQueryEngine::init_db`].
    pub async fn init_db_with_stats(&self, documents: Option<&[Document]>) -> Result<BuildStats> {
        let _guard = self.writer.lock().await;

        // A re-init keeps serving the previous graph until the swap.
        if !self.handle.state().is_ready() {
            self.handle.set_state(ServiceState::Initializing);
        }

        match self.rebuild(documents.unwrap_or_default()).await {
            Ok(stats) => {
                self.handle.set_state(ServiceState::Ready);
                Ok(stats)
            }
            Err(e) => {
                log::warn!("Engine '{}' init failed: {e}", self.handle.name());
                *self.current.write().await = None;
                self.handle.set_state(ServiceState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn rebuild(&self, documents: &[Document]) -> Result<BuildStats> {
        self.connect().await?;

        let builder = GraphBuilder::new(Arc::clone(&self.extractor))
            .with_error_handling(self.config.error_handling.clone());
        let (graph, stats) = builder
            .build(documents)
            .map_err(|e| Error::schema(e.to_string()))?;

        self.commit(&graph).await?;
        self.publish(graph).await;
        Ok(stats)
    }

    /// Restore the last committed graph from the store.
    ///
    /// Returns `Ok(false)` if the store holds no graph; the engine then
    /// stays uninitialized.
    pub async fn open(&self) -> Result<bool> {
        let _guard = self.writer.lock().await;
        self.connect().await?;

        let loaded = self
            .store
            .load()
            .await
            .map_err(|e| Error::connection(format!("store '{}' load failed: {e}", self.store.name())))?;
        let Some(graph) = loaded else {
            return Ok(false);
        };

        self.publish(graph).await;
        self.handle.set_state(ServiceState::Ready);
        Ok(true)
    }

    /// Apply records, returning statistics on success.
    ///
    /// Same semantics as [`GraphQueryEngine::add_records`], with the
    /// rejection reason surfaced as an error.
    pub async fn add_records_with_stats(&self, records: &[Record]) -> Result<BuildStats> {
        if records.is_empty() {
            if self.handle.state().is_ready() {
                return Ok(BuildStats::default());
            }
            return Err(self.unusable());
        }

        let _guard = self.writer.lock().await;
        if !self.handle.state().is_ready() {
            return Err(self.unusable());
        }
        let current = self
            .snapshot()
            .await
            .ok_or_else(|| Error::execution("no graph published"))?;

        let mut graph = current.graph.clone();
        let builder = GraphBuilder::new(Arc::clone(&self.extractor))
            .with_error_handling(ErrorHandling::FailFast);
        let stats = apply_records(&mut graph, records, &builder)?;

        self.commit(&graph).await?;
        self.publish(graph).await;
        log::info!(
            "Engine '{}' added {} records: {} nodes created, {} edges created",
            self.handle.name(),
            records.len(),
            stats.nodes_created,
            stats.edges_created
        );
        Ok(stats)
    }

    async fn connect(&self) -> Result<()> {
        self.store.connect().await.map_err(|e| {
            Error::connection(format!("store '{}' unreachable: {e}", self.store.name()))
        })
    }

    async fn commit(&self, graph: &GraphData) -> Result<()> {
        self.store.commit(graph).await.map_err(|e| {
            Error::connection(format!("store '{}' commit failed: {e}", self.store.name()))
        })
    }

    async fn publish(&self, graph: GraphData) {
        let indexed = Arc::new(IndexedGraph::new(graph, &self.filter));
        *self.current.write().await = Some(indexed);
    }

    fn unusable(&self) -> Error {
        match self.handle.state() {
            ServiceState::Failed(reason) => Error::execution(format!("engine unusable: {reason}")),
            state => Error::execution(format!("engine not ready ({state})")),
        }
    }
}

impl std::fmt::Debug for GraphRagEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphRagEngine")
            .field("name", &self.handle.name())
            .field("state", &self.handle.state())
            .field("store", &self.store.name())
            .finish()
    }
}

#[async_trait]
impl GraphQueryEngine for GraphRagEngine {
    async fn init_db(&self, documents: Option<&[Document]>) -> Result<()> {
        self.init_db_with_stats(documents).await.map(|_| ())
    }

    async fn add_records(&self, records: &[Record]) -> bool {
        match self.add_records_with_stats(records).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Engine '{}' rejected records: {e}", self.handle.name());
                false
            }
        }
    }

    async fn query(
        &self,
        question: &str,
        n_results: usize,
        options: &Map<String, Value>,
    ) -> Result<QueryResult> {
        let options = self.config.query.merged(options)?;
        let query = self.translator.translate(question, n_results, &options)?;

        if !self.handle.state().is_ready() {
            return Err(self.unusable());
        }
        let current = self
            .snapshot()
            .await
            .ok_or_else(|| Error::execution("no graph published"))?;

        let evidence = retrieve(&current.graph, &current.index, &query)?;
        let answer = match options.answer_mode {
            AnswerMode::Lookup => None,
            AnswerMode::Template => self.composer.compose(question, &evidence),
        };
        Ok(QueryResult::new(answer, evidence))
    }
}

// ============================================================================
// Tests
// ============================================================================

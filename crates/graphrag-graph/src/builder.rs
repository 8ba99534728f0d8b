//! GraphBuilder for constructing knowledge graphs from documents.
//!
//! The builder runs a [`GraphExtractor`] over a batch of documents and
//! merges the results into a [`GraphData`]:
//!
//! - **Two-phase build**: phase 1 adds every node from the batch, phase 2
//!   adds every edge. Edges may therefore reference nodes introduced by a
//!   later document in the same batch.
//! - **Dangling reference tracking**: edges whose endpoints are missing
//!   are recorded in `BuildStats::dangling_refs` instead of being added.
//! - **Edge deduplication**: an edge with the same (from, to,
//!   relationship) as an existing edge is counted and skipped.
//! - **Upsert policy**: entity nodes that already exist only gain
//!   provenance; a document ID that already exists is a schema error.

use crate::{Edge, GraphData, GraphExtractor, Node, NodeKind};
use graphrag_core::{Document, Error, Result, normalize_id};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Builder configuration types
// ============================================================================

/// Policy for documents that cannot be mapped to the graph schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorHandling {
    /// Stop on the first malformed document.
    #[default]
    FailFast,
    /// Log and skip malformed documents.
    Skip,
}

/// A document that failed extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildError {
    /// ID of the problematic document, as given.
    pub document_id: String,
    /// Error message.
    pub message: String,
}

/// Statistics from a graph build operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildStats {
    /// Documents that were examined.
    pub documents_processed: usize,
    /// Documents skipped due to schema errors.
    pub documents_skipped: usize,
    /// Number of nodes created.
    pub nodes_created: usize,
    /// Existing nodes that gained provenance.
    pub nodes_merged: usize,
    /// Number of edges created.
    pub edges_created: usize,
    /// Duplicate edges that were skipped.
    pub deduped_edges: usize,
    /// Edges that referenced missing nodes.
    pub dangling_refs: Vec<String>,
    /// Errors for skipped documents.
    pub errors: Vec<BuildError>,
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Builder for constructing knowledge graphs.
///
/// Generic over `E: GraphExtractor` so any extraction strategy can be used.
///
/// # Example
///
/// ```rust
/// use graphrag_core::Document;
/// use graphrag_graph::{EntityExtractor, GraphBuilder};
///
/// let docs = vec![Document::new("a", "Ada Lovelace met Charles Babbage.")];
/// let (graph, stats) = GraphBuilder::new(EntityExtractor::default())
///     .build(&docs)
///     .unwrap();
///
/// assert_eq!(stats.documents_processed, 1);
/// assert!(graph.contains_node("entity:charles-babbage"));
/// ```
pub struct GraphBuilder<E: GraphExtractor> {
    extractor: E,
    error_handling: ErrorHandling,
}

impl<E: GraphExtractor> GraphBuilder<E> {
    /// Creates a new builder with the given extractor.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            error_handling: ErrorHandling::default(),
        }
    }

    /// Sets the error handling strategy.
    pub fn with_error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Returns the configured extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Builds a new graph from the documents.
    pub fn build(&self, documents: &[Document]) -> Result<(GraphData, BuildStats)> {
        let mut graph = GraphData::new();
        let stats = self.extend(&mut graph, documents)?;
        Ok((graph, stats))
    }

    /// Merges the documents into an existing graph.
    ///
    /// With [`ErrorHandling::FailFast`] the graph may be partially
    /// modified when an error is returned; callers that need atomicity
    /// extend a clone and swap it in on success.
    pub fn extend(&self, graph: &mut GraphData, documents: &[Document]) -> Result<BuildStats> {
        let mut stats = BuildStats::default();
        let mut batch_ids: HashSet<String> = HashSet::new();
        let mut pending_edges: Vec<Edge> = Vec::new();

        // ================================================================
        // Phase 1: Extract and add all nodes
        // ================================================================
        for doc in documents {
            stats.documents_processed += 1;

            match self.extract_checked(graph, &mut batch_ids, doc) {
                Ok(extraction) => {
                    let nodes = extraction.document.into_iter().chain(extraction.entities);
                    for node in nodes {
                        self.merge_node(graph, node, &mut stats);
                    }
                    pending_edges.extend(extraction.edges);
                }
                Err(e) => match self.error_handling {
                    ErrorHandling::FailFast => return Err(e),
                    ErrorHandling::Skip => {
                        log::warn!("Skipping document '{}': {e}", doc.id);
                        stats.documents_skipped += 1;
                        stats.errors.push(BuildError {
                            document_id: doc.id.clone(),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        // ================================================================
        // Phase 2: Add all edges (with dedup and dangling ref tracking)
        // ================================================================
        for edge in pending_edges {
            add_edge_tracked(graph, edge, &mut stats);
        }

        log::info!(
            "Graph build: {} documents, {} nodes created, {} edges created, {} skipped",
            stats.documents_processed,
            stats.nodes_created,
            stats.edges_created,
            stats.documents_skipped
        );

        Ok(stats)
    }

    /// Extract a document, rejecting IDs already used by a document node.
    fn extract_checked(
        &self,
        graph: &GraphData,
        batch_ids: &mut HashSet<String>,
        doc: &Document,
    ) -> Result<crate::Extraction> {
        let id = normalize_id(&doc.id);
        let exists_in_graph = graph
            .get_node(&id)
            .is_some_and(|n| n.kind == NodeKind::Document);
        if exists_in_graph || batch_ids.contains(&id) {
            return Err(Error::parse(format!("duplicate document id '{id}'")));
        }

        let extraction = self.extractor.extract(doc)?;
        batch_ids.insert(id);
        Ok(extraction)
    }

    fn merge_node(&self, graph: &mut GraphData, node: Node, stats: &mut BuildStats) {
        if graph.upsert_node(node) {
            stats.nodes_created += 1;
        } else {
            stats.nodes_merged += 1;
        }
    }
}

/// Add an edge unless it dangles or duplicates an existing edge.
///
/// Returns `true` if the edge was added.
pub fn add_edge_tracked(graph: &mut GraphData, edge: Edge, stats: &mut BuildStats) -> bool {
    if !graph.contains_node(&edge.from) || !graph.contains_node(&edge.to) {
        stats.dangling_refs.push(format!(
            "{} -[{}]-> {}",
            edge.from,
            edge.relationship.name(),
            edge.to
        ));
        return false;
    }

    if graph.contains_edge(&edge) {
        stats.deduped_edges += 1;
        return false;
    }

    match graph.add_edge(edge) {
        Ok(()) => {
            stats.edges_created += 1;
            true
        }
        Err(_) => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

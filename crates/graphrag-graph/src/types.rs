//! Core graph types.
//!
//! Nodes are either documents or entities mentioned in documents; edges
//! record mentions, sentence-level co-occurrence, and explicit
//! relationships supplied by callers. Domain-specific kinds and
//! relationships use the `Custom` variants.

use graphrag_core::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Relationship enum
// ============================================================================

/// Relationship types for graph edges.
///
/// # Example
///
/// ```rust
/// use graphrag_graph::Relationship;
///
/// assert_eq!(Relationship::Mentions.default_weight(), 1.0);
/// assert_eq!(Relationship::parse("works_with"), Relationship::Custom("works_with".into()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// Document A mentions entity B.
    Mentions,
    /// A and B appear in the same sentence.
    CoOccurs,
    /// A and B are related (explicit, untyped).
    #[default]
    RelatesTo,
    /// Caller-defined relationship.
    Custom(String),
}

impl Relationship {
    /// Default weight for this relationship type.
    ///
    /// Weights scale evidence scores during traversal.
    pub fn default_weight(&self) -> f32 {
        match self {
            Self::Mentions => 1.0,
            Self::CoOccurs => 0.8,
            Self::RelatesTo => 0.9,
            Self::Custom(_) => 0.7,
        }
    }

    /// Returns the relationship name as a string.
    pub fn name(&self) -> &str {
        match self {
            Self::Mentions => "mentions",
            Self::CoOccurs => "co_occurs",
            Self::RelatesTo => "relates_to",
            Self::Custom(name) => name,
        }
    }

    /// Parse a relationship name, falling back to `Custom`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mentions" => Self::Mentions,
            "co_occurs" | "cooccurs" | "co-occurs" => Self::CoOccurs,
            "relates_to" | "relatesto" | "related" => Self::RelatesTo,
            other => Self::Custom(other.to_string()),
        }
    }
}

// ============================================================================
// EdgeOrigin enum
// ============================================================================

/// Where an edge came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrigin {
    /// Derived from document text by an extractor.
    #[default]
    Extracted,
    /// Supplied explicitly as a record.
    Record,
}

// ============================================================================
// NodeKind enum
// ============================================================================

/// Kind of a graph node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A source document.
    Document,
    /// An entity mentioned in documents (the default).
    #[default]
    Entity,
    /// Caller-defined node kind.
    Custom(String),
}

impl NodeKind {
    /// Returns the kind name as a string.
    pub fn name(&self) -> &str {
        match self {
            Self::Document => "document",
            Self::Entity => "entity",
            Self::Custom(name) => name,
        }
    }
}

// ============================================================================
// Node struct
// ============================================================================

/// A node in the knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Node kind.
    #[serde(default)]
    pub kind: NodeKind,
    /// Optional category for grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Document body, for document nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// IDs of the documents or records this node was derived from.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Creates a new entity node with the given ID and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::default(),
            category: None,
            text: None,
            sources: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the node kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the document body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Records a source document or record ID.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
        self
    }

    /// Adds a metadata key-value pair.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Edge struct
// ============================================================================

/// An edge connecting two nodes in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node ID.
    pub from: String,
    /// Target node ID.
    pub to: String,
    /// Type of relationship.
    pub relationship: Relationship,
    /// Edge weight in (0, 1].
    pub weight: f32,
    /// Where this edge originated.
    #[serde(default)]
    pub origin: EdgeOrigin,
}

impl Edge {
    /// Creates a new edge with default weight from relationship type.
    pub fn new(from: impl Into<String>, to: impl Into<String>, relationship: Relationship) -> Self {
        let weight = relationship.default_weight();
        Self {
            from: from.into(),
            to: to.into(),
            relationship,
            weight,
            origin: EdgeOrigin::default(),
        }
    }

    /// Sets an explicit weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the edge origin.
    pub fn with_origin(mut self, origin: EdgeOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Deduplication key: (from, to, relationship name).
    pub fn key(&self) -> (String, String, String) {
        (
            self.from.clone(),
            self.to.clone(),
            self.relationship.name().to_string(),
        )
    }
}

// ============================================================================
// GraphSnapshot struct
// ============================================================================

/// Serializable form of a graph, used by persistent stores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All nodes, ordered by ID.
    pub nodes: Vec<Node>,
    /// All edges, in insertion order.
    pub edges: Vec<Edge>,
}

// ============================================================================
// GraphData struct
// ============================================================================

/// Core graph data structure.
///
/// Wraps a petgraph `DiGraph` with lookup tables. The node table is a
/// `BTreeMap` so iteration order is stable for a given graph state.
#[derive(Clone, Debug)]
pub struct GraphData {
    /// The underlying directed graph.
    pub graph: DiGraph<Node, Edge>,
    /// Lookup table: node ID → petgraph NodeIndex.
    pub node_indices: HashMap<String, NodeIndex>,
    /// Lookup table: node ID → Node data.
    pub nodes: BTreeMap<String, Node>,
    /// All edges as a flat list (for serialization).
    pub edges: Vec<Edge>,
}

impl GraphData {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by ID.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Gets the petgraph NodeIndex for a node ID.
    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Checks if a node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Checks if an edge with the same (from, to, relationship) exists.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        let (Some(from), Some(to)) = (self.get_index(&edge.from), self.get_index(&edge.to)) else {
            return false;
        };
        self.graph
            .edges_connecting(from, to)
            .any(|e| e.weight().relationship == edge.relationship)
    }

    /// Returns an iterator over all nodes, ordered by ID.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns an iterator over all edges.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Add a node to the graph.
    ///
    /// If a node with the same ID already exists, returns its existing index
    /// and leaves it untouched.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&existing_idx) = self.node_indices.get(&node.id) {
            return existing_idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node.clone());
        self.node_indices.insert(id.clone(), idx);
        self.nodes.insert(id, node);
        idx
    }

    /// Add a node, or merge provenance into an existing node.
    ///
    /// Existing titles, kinds, categories and text are never overwritten.
    /// Only new `sources` entries and metadata keys not yet present are
    /// merged. Returns `true` if a new node was created.
    pub fn upsert_node(&mut self, node: Node) -> bool {
        let Some(&idx) = self.node_indices.get(&node.id) else {
            self.add_node(node);
            return true;
        };

        let mut merged = self.graph[idx].clone();
        for source in node.sources {
            if !merged.sources.contains(&source) {
                merged.sources.push(source);
            }
        }
        for (key, value) in node.metadata {
            merged.metadata.entry(key).or_insert(value);
        }

        self.nodes.insert(merged.id.clone(), merged.clone());
        self.graph[idx] = merged;
        false
    }

    /// Add an edge between two nodes identified by ID.
    ///
    /// Both nodes must already exist in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let from_idx = self
            .get_index(&edge.from)
            .ok_or_else(|| Error::not_found("node", &edge.from))?;
        let to_idx = self
            .get_index(&edge.to)
            .ok_or_else(|| Error::not_found("node", &edge.to))?;

        self.graph.add_edge(from_idx, to_idx, edge.clone());
        self.edges.push(edge);
        Ok(())
    }

    /// Convert to the serializable snapshot form.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Fails if an edge references a node missing from the snapshot.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let mut graph = Self::new();
        for node in snapshot.nodes {
            graph.add_node(node);
        }
        for edge in snapshot.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

impl Default for GraphData {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Records accepted by `add_records`.
//!
//! A batch may mix documents (run through the extractor), explicit entity
//! nodes, and explicit edges. Batches are applied in three passes:
//! documents, then node records, then edge records, so an edge may refer
//! to a node introduced anywhere in the same batch.

use crate::error::{Error, Result};
use graphrag_core::util::ids::is_entity_id;
use graphrag_core::{Document, entity_id, normalize_id};
use graphrag_graph::{
    BuildStats, Edge, EdgeOrigin, GraphBuilder, GraphData, GraphExtractor, Node, NodeKind,
    Relationship, add_edge_tracked,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unit of input to `add_records`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// A document, extracted the same way `init_db` does.
    Document(Document),
    /// An explicit entity node.
    Node(NodeRecord),
    /// An explicit relationship.
    Edge(EdgeRecord),
}

impl From<Document> for Record {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<NodeRecord> for Record {
    fn from(node: NodeRecord) -> Self {
        Self::Node(node)
    }
}

impl From<EdgeRecord> for Record {
    fn from(edge: EdgeRecord) -> Self {
        Self::Edge(edge)
    }
}

/// An explicit entity node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node ID; defaults to the entity ID derived from `title`.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub title: String,
    /// Optional category (indexed like a title).
    #[serde(default)]
    pub category: Option<String>,
    /// Optional description (indexed like document text).
    #[serde(default)]
    pub text: Option<String>,
    /// Provenance label recorded in the node's `sources`.
    #[serde(default)]
    pub source: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl NodeRecord {
    /// Create a node record from a display name.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets an explicit ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the description.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the provenance label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Resolve the graph node ID for this record.
    pub fn node_id(&self) -> String {
        let raw = if self.id.trim().is_empty() {
            &self.title
        } else {
            &self.id
        };
        let normalized = normalize_id(raw);
        if is_entity_id(&normalized) {
            normalized
        } else {
            entity_id(raw)
        }
    }

    fn to_node(&self) -> Result<Node> {
        if self.title.trim().is_empty() {
            return Err(Error::schema("node record has an empty title"));
        }
        let id = self.node_id();

        let mut node = Node::new(id, self.title.trim()).with_kind(NodeKind::Entity);
        if let Some(category) = &self.category {
            node = node.with_category(category.clone());
        }
        if let Some(text) = &self.text {
            node = node.with_text(text.clone());
        }
        if let Some(source) = &self.source {
            node = node.with_source(source.clone());
        }
        for (key, value) in &self.metadata {
            node = node.with_metadata(key.clone(), value.clone());
        }
        Ok(node)
    }
}

/// An explicit relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node reference (node ID, document ID, or entity name).
    pub from: String,
    /// Target node reference.
    pub to: String,
    /// Relationship name; unknown names become custom relationships.
    #[serde(default = "default_relationship")]
    pub relationship: String,
    /// Edge weight in (0, 1]; defaults to the relationship's weight.
    #[serde(default)]
    pub weight: Option<f32>,
}

fn default_relationship() -> String {
    Relationship::RelatesTo.name().to_string()
}

impl EdgeRecord {
    /// Create an edge record.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relationship: relationship.into(),
            weight: None,
        }
    }

    /// Sets an explicit weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    fn to_edge(&self, graph: &GraphData) -> Result<Edge> {
        let from = resolve_node_ref(graph, &self.from)
            .ok_or_else(|| Error::schema(format!("edge source '{}' not found", self.from)))?;
        let to = resolve_node_ref(graph, &self.to)
            .ok_or_else(|| Error::schema(format!("edge target '{}' not found", self.to)))?;
        if self.relationship.trim().is_empty() {
            return Err(Error::schema("edge record has an empty relationship"));
        }

        let mut edge = Edge::new(from, to, Relationship::parse(&self.relationship))
            .with_origin(EdgeOrigin::Record);
        if let Some(weight) = self.weight {
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(Error::schema(format!(
                    "edge weight must be within (0, 1], got {weight}"
                )));
            }
            edge = edge.with_weight(weight);
        }
        Ok(edge)
    }
}

/// Resolve a caller-supplied node reference.
///
/// Exact IDs win, then normalized IDs, then the entity ID for the name.
pub fn resolve_node_ref(graph: &GraphData, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if graph.contains_node(trimmed) {
        return Some(trimmed.to_string());
    }
    let normalized = normalize_id(trimmed);
    if graph.contains_node(&normalized) {
        return Some(normalized);
    }
    let entity = entity_id(trimmed);
    graph.contains_node(&entity).then_some(entity)
}

/// Apply a batch of records to a graph.
///
/// Any invalid record fails the whole call with a `Schema` error; callers
/// apply batches to a copy of the live graph.
pub fn apply_records<E: GraphExtractor>(
    graph: &mut GraphData,
    records: &[Record],
    builder: &GraphBuilder<E>,
) -> Result<BuildStats> {
    let documents: Vec<Document> = records
        .iter()
        .filter_map(|r| match r {
            Record::Document(doc) => Some(doc.clone()),
            _ => None,
        })
        .collect();

    let mut stats = if documents.is_empty() {
        BuildStats::default()
    } else {
        builder
            .extend(graph, &documents)
            .map_err(|e| Error::schema(e.to_string()))?
    };

    for record in records {
        if let Record::Node(node_record) = record {
            if graph.upsert_node(node_record.to_node()?) {
                stats.nodes_created += 1;
            } else {
                stats.nodes_merged += 1;
            }
        }
    }

    for record in records {
        if let Record::Edge(edge_record) = record {
            let edge = edge_record.to_edge(graph)?;
            add_edge_tracked(graph, edge, &mut stats);
        }
    }

    if !stats.dangling_refs.is_empty() {
        return Err(Error::schema(format!(
            "dangling edges: {}",
            stats.dangling_refs.join(", ")
        )));
    }

    Ok(stats)
}

// ============================================================================
// Tests
// ============================================================================

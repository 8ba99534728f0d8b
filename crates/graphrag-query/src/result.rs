//! Query results and evidence items.

use graphrag_graph::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Evidence
// ============================================================================

/// One piece of graph evidence surfaced by a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    /// A matched entity or document node.
    Node {
        /// The node.
        node: Node,
        /// Relevance score.
        score: f32,
    },
    /// A relationship between two evidence nodes.
    Edge {
        /// The edge.
        edge: Edge,
        /// Relevance score.
        score: f32,
    },
    /// A multi-hop path starting at a seed node.
    Path {
        /// Nodes from the seed to the reached node, inclusive.
        nodes: Vec<Node>,
        /// Edges along the path.
        edges: Vec<Edge>,
        /// Relevance score.
        score: f32,
    },
}

impl Evidence {
    /// Relevance score of this item.
    pub fn score(&self) -> f32 {
        match self {
            Self::Node { score, .. } | Self::Edge { score, .. } | Self::Path { score, .. } => {
                *score
            }
        }
    }

    /// Item kind name: `node`, `edge` or `path`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node { .. } => "node",
            Self::Edge { .. } => "edge",
            Self::Path { .. } => "path",
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Node { .. } => 0,
            Self::Edge { .. } => 1,
            Self::Path { .. } => 2,
        }
    }

    /// Stable identity of the item, used to break score ties.
    pub fn key(&self) -> String {
        match self {
            Self::Node { node, .. } => node.id.clone(),
            Self::Edge { edge, .. } => {
                format!("{}|{}|{}", edge.from, edge.relationship.name(), edge.to)
            }
            Self::Path { nodes, .. } => nodes
                .iter()
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>()
                .join(">"),
        }
    }

    /// IDs of every node this item refers to.
    pub fn node_ids(&self) -> Vec<&str> {
        match self {
            Self::Node { node, .. } => vec![node.id.as_str()],
            Self::Edge { edge, .. } => vec![edge.from.as_str(), edge.to.as_str()],
            Self::Path { nodes, .. } => nodes.iter().map(|n| n.id.as_str()).collect(),
        }
    }

    /// Ranking order: score descending, then kind, then key.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score()
            .total_cmp(&self.score())
            .then_with(|| self.kind_rank().cmp(&other.kind_rank()))
            .then_with(|| self.key().cmp(&other.key()))
    }
}

/// Sort evidence into ranking order.
pub fn sort_evidence(items: &mut [Evidence]) {
    items.sort_by(Evidence::rank_cmp);
}

// ============================================================================
// QueryResult
// ============================================================================

/// The outcome of one query.
///
/// `answer` is `None` when the engine produced no natural-language answer
/// (entity-lookup mode, or nothing found); that is distinct from
/// `Some("")`. An empty `results` list means no evidence surfaced. The
/// value is read-only once returned.
///
/// ```rust
/// use graphrag_query::QueryResult;
///
/// let result = QueryResult::empty();
/// assert!(result.answer().is_none());
/// assert!(result.results().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<Evidence>,
}

impl QueryResult {
    /// Create a result from an answer and evidence list.
    pub fn new(answer: Option<String>, results: Vec<Evidence>) -> Self {
        Self { answer, results }
    }

    /// A result with no answer and no evidence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The synthesized answer, if any.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Evidence items, best first.
    pub fn results(&self) -> &[Evidence] {
        &self.results
    }

    /// Number of evidence items.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if no evidence surfaced.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consume the result, returning its parts.
    pub fn into_parts(self) -> (Option<String>, Vec<Evidence>) {
        (self.answer, self.results)
    }
}

// ============================================================================
// Tests
// ============================================================================

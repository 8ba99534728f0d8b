//! Graph algorithms used by retrieval.
//!
//! Provides:
//! - Neighborhood exploration (N-hop BFS with a capped depth and parent
//!   tracking, so the path back to the center can be recovered)
//! - Summary statistics for reporting
//!
//! Traversal treats edges as undirected and visits neighbors in a
//! deterministic order (neighbor ID, then relationship name), so results
//! do not depend on petgraph's internal edge order.

use crate::{Edge, GraphData, Node, Relationship};
use graphrag_core::{Error, Result};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Maximum allowed BFS depth to prevent runaway traversals.
pub const MAX_BFS_DEPTH: usize = 10;

// ============================================================================
// Result types
// ============================================================================

/// Result of a neighborhood query.
#[derive(Clone, Debug)]
pub struct NeighborhoodResult {
    /// The central node.
    pub center: Node,
    /// Nodes within the radius, in BFS discovery order (center excluded).
    pub nodes: Vec<Node>,
    /// The BFS tree edge that discovered each entry of `nodes`.
    pub edges: Vec<Edge>,
    /// Distance from center to each node (by node ID).
    pub distances: HashMap<String, usize>,
    parents: HashMap<String, (String, usize)>,
}

/// A path from the neighborhood center to one of its nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct TraversalPath {
    /// Nodes from the center to the target, inclusive.
    pub nodes: Vec<Node>,
    /// Edges along the path.
    pub edges: Vec<Edge>,
}

impl TraversalPath {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// Product of the edge weights along the path.
    pub fn weight_product(&self) -> f32 {
        self.edges.iter().map(|e| e.weight).product()
    }
}

impl NeighborhoodResult {
    /// Recover the BFS tree path from the center to `id`.
    ///
    /// Returns `None` for IDs outside the neighborhood. The path to the
    /// center itself has no edges.
    pub fn path_to(&self, id: &str) -> Option<TraversalPath> {
        if id == self.center.id {
            return Some(TraversalPath {
                nodes: vec![self.center.clone()],
                edges: Vec::new(),
            });
        }

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut current = id;
        while current != self.center.id {
            let (parent, slot) = self.parents.get(current)?;
            nodes.push(self.nodes[*slot].clone());
            edges.push(self.edges[*slot].clone());
            current = parent;
        }
        nodes.push(self.center.clone());

        nodes.reverse();
        edges.reverse();
        Some(TraversalPath { nodes, edges })
    }
}

/// Summary statistics for a graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphStats {
    /// Total node count.
    pub node_count: usize,
    /// Total edge count.
    pub edge_count: usize,
    /// Node count per kind name.
    pub nodes_by_kind: BTreeMap<String, usize>,
    /// Edge count per relationship name.
    pub edges_by_relationship: BTreeMap<String, usize>,
    /// Nodes with no edges at all.
    pub isolated_nodes: usize,
}

// ============================================================================
// Algorithms
// ============================================================================

/// Get the N-hop neighborhood around a node.
///
/// Performs a breadth-first search from the center node over edges in
/// both directions, collecting nodes within `radius` hops. Depth is
/// capped at [`MAX_BFS_DEPTH`].
///
/// # Arguments
///
/// * `graph` - The graph to search
/// * `center_id` - ID of the center node
/// * `radius` - Maximum distance from center (hops), capped at 10
/// * `relationship_filter` - Optional filter for edge types to follow
pub fn neighborhood(
    graph: &GraphData,
    center_id: &str,
    radius: usize,
    relationship_filter: Option<&[Relationship]>,
) -> Result<NeighborhoodResult> {
    let center_node = graph
        .get_node(center_id)
        .ok_or_else(|| Error::not_found("node", center_id))?
        .clone();
    let center_idx = graph
        .get_index(center_id)
        .ok_or_else(|| Error::not_found("node index", center_id))?;

    let radius = radius.min(MAX_BFS_DEPTH);

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
    let mut result = NeighborhoodResult {
        center: center_node,
        nodes: Vec::new(),
        edges: Vec::new(),
        distances: HashMap::new(),
        parents: HashMap::new(),
    };

    visited.insert(center_idx);
    result.distances.insert(center_id.to_string(), 0);
    queue.push_back((center_idx, 0));

    while let Some((current_idx, current_dist)) = queue.pop_front() {
        if current_dist >= radius {
            continue;
        }

        for (neighbor_idx, edge) in sorted_neighbors(graph, current_idx, relationship_filter) {
            if !visited.insert(neighbor_idx) {
                continue;
            }
            let neighbor = &graph.graph[neighbor_idx];
            let parent_id = graph.graph[current_idx].id.clone();

            result
                .distances
                .insert(neighbor.id.clone(), current_dist + 1);
            result
                .parents
                .insert(neighbor.id.clone(), (parent_id, result.nodes.len()));
            result.nodes.push(neighbor.clone());
            result.edges.push(edge.clone());
            queue.push_back((neighbor_idx, current_dist + 1));
        }
    }

    Ok(result)
}

/// Neighbors of a node in both directions, ordered by neighbor ID and
/// then relationship name.
fn sorted_neighbors<'a>(
    graph: &'a GraphData,
    idx: NodeIndex,
    relationship_filter: Option<&[Relationship]>,
) -> Vec<(NodeIndex, &'a Edge)> {
    let outgoing = graph
        .graph
        .edges_directed(idx, Direction::Outgoing)
        .map(|e| (e.target(), e.weight()));
    let incoming = graph
        .graph
        .edges_directed(idx, Direction::Incoming)
        .map(|e| (e.source(), e.weight()));

    let mut neighbors: Vec<(NodeIndex, &Edge)> = outgoing
        .chain(incoming)
        .filter(|(_, edge)| relationship_filter.is_none_or(|f| f.contains(&edge.relationship)))
        .collect();

    neighbors.sort_by(|(a_idx, a_edge), (b_idx, b_edge)| {
        graph.graph[*a_idx]
            .id
            .cmp(&graph.graph[*b_idx].id)
            .then_with(|| a_edge.relationship.name().cmp(b_edge.relationship.name()))
    });
    neighbors
}

/// Compute summary statistics for a graph.
pub fn compute_stats(graph: &GraphData) -> GraphStats {
    let mut stats = GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        ..Default::default()
    };

    for node in graph.iter_nodes() {
        *stats
            .nodes_by_kind
            .entry(node.kind.name().to_string())
            .or_default() += 1;
    }
    for edge in graph.iter_edges() {
        *stats
            .edges_by_relationship
            .entry(edge.relationship.name().to_string())
            .or_default() += 1;
    }

    stats.isolated_nodes = graph
        .graph
        .node_indices()
        .filter(|&idx| graph.graph.neighbors_undirected(idx).next().is_none())
        .count();

    stats
}

// ============================================================================
// Tests
// ============================================================================

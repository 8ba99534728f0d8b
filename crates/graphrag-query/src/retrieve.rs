//! Evidence retrieval over an indexed graph.
//!
//! Seeds come from the term index. Each seed is expanded by BFS up to
//! `max_hops`; a reached node scores
//! `seed_score * product(edge weights) * 0.5^hops`, and keeps the best
//! score over all seeds. Edges between evidence nodes score as the
//! weaker endpoint times the edge weight. Paths of two or more hops are
//! reported once per reached node.

use crate::error::{Error, Result};
use crate::result::{Evidence, sort_evidence};
use crate::translate::GraphQuery;
use graphrag_graph::{GraphData, TermIndex, TraversalPath, neighborhood};
use std::collections::BTreeMap;

/// Per-hop score decay.
pub const HOP_DECAY: f32 = 0.5;

/// Run a graph query, returning at most `query.limit` items in ranking order.
pub fn retrieve(graph: &GraphData, index: &TermIndex, query: &GraphQuery) -> Result<Vec<Evidence>> {
    let options = &query.options;
    let seeds: Vec<_> = index
        .lookup(&query.terms)
        .into_iter()
        .filter(|s| s.score > 0.0 && s.score >= options.similarity_threshold)
        .collect();

    let mut node_scores: BTreeMap<String, f32> = BTreeMap::new();
    let mut best_paths: BTreeMap<String, (TraversalPath, f32)> = BTreeMap::new();

    for seed in &seeds {
        raise(&mut node_scores, &seed.node_id, seed.score);
        if options.max_hops == 0 {
            continue;
        }

        let hood = neighborhood(graph, &seed.node_id, options.max_hops, None)
            .map_err(|e| Error::execution(format!("traversal from '{}' failed: {e}", seed.node_id)))?;

        for node in &hood.nodes {
            let Some(path) = hood.path_to(&node.id) else {
                continue;
            };
            let hops = path.hops();
            let score = seed.score * path.weight_product() * HOP_DECAY.powi(hops as i32);
            raise(&mut node_scores, &node.id, score);

            if options.include_paths && hops >= 2 {
                let better = best_paths
                    .get(&node.id)
                    .is_none_or(|(_, best)| score > *best);
                if better {
                    best_paths.insert(node.id.clone(), (path, score));
                }
            }
        }
    }

    let mut evidence: Vec<Evidence> = Vec::new();
    for (id, score) in &node_scores {
        if let Some(node) = graph.get_node(id) {
            evidence.push(Evidence::Node {
                node: node.clone(),
                score: *score,
            });
        }
    }

    if options.include_edges {
        for edge in graph.iter_edges() {
            let (Some(from), Some(to)) = (node_scores.get(&edge.from), node_scores.get(&edge.to))
            else {
                continue;
            };
            evidence.push(Evidence::Edge {
                edge: edge.clone(),
                score: from.min(*to) * edge.weight,
            });
        }
    }

    for (path, score) in best_paths.into_values() {
        evidence.push(Evidence::Path {
            nodes: path.nodes,
            edges: path.edges,
            score,
        });
    }

    sort_evidence(&mut evidence);
    evidence.truncate(query.limit);

    log::debug!(
        "Query '{}': {} seeds, {} evidence items returned",
        query.question,
        seeds.len(),
        evidence.len()
    );
    Ok(evidence)
}

fn raise(scores: &mut BTreeMap<String, f32>, id: &str, score: f32) {
    let entry = scores.entry(id.to_string()).or_insert(score);
    if score > *entry {
        *entry = score;
    }
}

// ============================================================================
// Tests
// ============================================================================

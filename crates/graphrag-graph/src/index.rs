//! Inverted term index over graph nodes.
//!
//! Maps each meaningful term to the nodes whose title (or category, or
//! document text) contains it. Lookups score nodes by the fraction of
//! query terms they match, with title matches worth more than body
//! matches. All maps are ordered, so lookups are deterministic for a
//! given graph.

use crate::stopwords::StopwordFilter;
use crate::{GraphData, Node};
use std::collections::BTreeMap;

/// Where in a node a term occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TermField {
    /// Document text only.
    Body,
    /// Title or category.
    Title,
}

impl TermField {
    /// Score contribution of a match in this field.
    pub fn weight(self) -> f32 {
        match self {
            Self::Title => 1.0,
            Self::Body => 0.5,
        }
    }
}

/// A node matched by a term lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedMatch {
    /// Matched node ID.
    pub node_id: String,
    /// Match score in [0, 1].
    pub score: f32,
    /// Query terms that matched, in query order.
    pub matched_terms: Vec<String>,
}

/// Inverted index from terms to node IDs.
#[derive(Clone, Debug, Default)]
pub struct TermIndex {
    postings: BTreeMap<String, BTreeMap<String, TermField>>,
}

impl TermIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index covering every node in the graph.
    pub fn build(graph: &GraphData, filter: &StopwordFilter) -> Self {
        let mut index = Self::new();
        for node in graph.iter_nodes() {
            index.index_node(node, filter);
        }
        log::debug!(
            "Built term index: {} terms over {} nodes",
            index.term_count(),
            graph.node_count()
        );
        index
    }

    /// Adds a node's terms to the index.
    pub fn index_node(&mut self, node: &Node, filter: &StopwordFilter) {
        let mut title_text = node.title.clone();
        if let Some(category) = &node.category {
            title_text.push(' ');
            title_text.push_str(category);
        }

        for term in filter.terms(&title_text) {
            self.insert(term, &node.id, TermField::Title);
        }
        if let Some(text) = &node.text {
            for term in filter.terms(text) {
                self.insert(term, &node.id, TermField::Body);
            }
        }
    }

    fn insert(&mut self, term: String, node_id: &str, field: TermField) {
        let entry = self
            .postings
            .entry(term)
            .or_default()
            .entry(node_id.to_string())
            .or_insert(field);
        if field > *entry {
            *entry = field;
        }
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Node IDs containing a term.
    pub fn nodes_for(&self, term: &str) -> impl Iterator<Item = &str> {
        self.postings
            .get(term)
            .into_iter()
            .flat_map(|nodes| nodes.keys().map(String::as_str))
    }

    /// Score every node matching at least one of the terms.
    ///
    /// Results are ordered by score (descending), then node ID.
    pub fn lookup(&self, terms: &[String]) -> Vec<SeedMatch> {
        if terms.is_empty() {
            return Vec::new();
        }

        let mut matches: BTreeMap<&str, (f32, Vec<String>)> = BTreeMap::new();
        for term in terms {
            let Some(nodes) = self.postings.get(term) else {
                continue;
            };
            for (node_id, field) in nodes {
                let entry = matches.entry(node_id.as_str()).or_default();
                entry.0 += field.weight();
                entry.1.push(term.clone());
            }
        }

        let total = terms.len() as f32;
        let mut seeds: Vec<SeedMatch> = matches
            .into_iter()
            .map(|(node_id, (sum, matched_terms))| SeedMatch {
                node_id: node_id.to_string(),
                score: (sum / total).min(1.0),
                matched_terms,
            })
            .collect();

        seeds.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.node_id.cmp(&b.node_id))
        });
        seeds
    }
}

// ============================================================================
// Tests
// ============================================================================

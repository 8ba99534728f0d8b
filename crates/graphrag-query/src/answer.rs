//! Answer composition.

use crate::result::Evidence;
use std::collections::HashMap;

/// Trait for producing a natural-language answer from evidence.
pub trait AnswerComposer: Send + Sync {
    /// Compose an answer, or `None` if the evidence supports none.
    fn compose(&self, question: &str, evidence: &[Evidence]) -> Option<String>;
}

/// Deterministic template answers.
///
/// Names the top nodes, then states up to `max_relations` relationships
/// between them:
///
/// ```text
/// Most relevant: Ada Lovelace, Charles Babbage. Ada Lovelace co_occurs Charles Babbage.
/// ```
#[derive(Clone, Debug)]
pub struct TemplateComposer {
    max_entities: usize,
    max_relations: usize,
}

impl TemplateComposer {
    /// Create a composer with default limits.
    pub fn new() -> Self {
        Self {
            max_entities: 3,
            max_relations: 2,
        }
    }

    /// Sets the number of nodes named in the answer.
    pub fn with_max_entities(mut self, max: usize) -> Self {
        self.max_entities = max.max(1);
        self
    }

    /// Sets the number of relationships stated in the answer.
    pub fn with_max_relations(mut self, max: usize) -> Self {
        self.max_relations = max;
        self
    }
}

impl Default for TemplateComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerComposer for TemplateComposer {
    fn compose(&self, _question: &str, evidence: &[Evidence]) -> Option<String> {
        let mut titles: HashMap<&str, &str> = HashMap::new();
        let mut names: Vec<&str> = Vec::new();

        for item in evidence {
            let nodes = match item {
                Evidence::Node { node, .. } => std::slice::from_ref(node),
                Evidence::Path { nodes, .. } => nodes.as_slice(),
                Evidence::Edge { .. } => &[],
            };
            for node in nodes {
                titles.insert(node.id.as_str(), node.title.as_str());
            }
            if let Evidence::Node { node, .. } = item {
                if names.len() < self.max_entities && !names.contains(&node.title.as_str()) {
                    names.push(node.title.as_str());
                }
            }
        }

        let title = |id: &str| titles.get(id).copied().unwrap_or(id).to_string();
        let relations: Vec<String> = evidence
            .iter()
            .filter_map(|item| match item {
                Evidence::Edge { edge, .. } => Some(format!(
                    "{} {} {}.",
                    title(&edge.from),
                    edge.relationship.name(),
                    title(&edge.to)
                )),
                _ => None,
            })
            .take(self.max_relations)
            .collect();

        if names.is_empty() && relations.is_empty() {
            return None;
        }

        let mut answer = String::new();
        if !names.is_empty() {
            answer.push_str(&format!("Most relevant: {}.", names.join(", ")));
        }
        for relation in relations {
            if !answer.is_empty() {
                answer.push(' ');
            }
            answer.push_str(&relation);
        }
        Some(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphrag_graph::{Edge, Node, Relationship};

    fn evidence() -> Vec<Evidence> {
        vec![
            Evidence::Node {
                node: Node::new("entity:ada-lovelace", "Ada Lovelace"),
                score: 1.0,
            },
            Evidence::Node {
                node: Node::new("entity:charles-babbage", "Charles Babbage"),
                score: 0.4,
            },
            Evidence::Edge {
                edge: Edge::new(
                    "entity:ada-lovelace",
                    "entity:charles-babbage",
                    Relationship::CoOccurs,
                ),
                score: 0.3,
            },
        ]
    }

    #[test]
    fn test_compose_names_and_relations() {
        let answer = TemplateComposer::new().compose("Lovelace?", &evidence()).unwrap();
        assert_eq!(
            answer,
            "Most relevant: Ada Lovelace, Charles Babbage. \
             Ada Lovelace co_occurs Charles Babbage."
        );
    }

    #[test]
    fn test_compose_respects_limits() {
        let answer = TemplateComposer::new()
            .with_max_entities(1)
            .with_max_relations(0)
            .compose("Lovelace?", &evidence())
            .unwrap();
        assert_eq!(answer, "Most relevant: Ada Lovelace.");
    }

    #[test]
    fn test_compose_nothing() {
        assert!(TemplateComposer::new().compose("anything", &[]).is_none());
    }

    #[test]
    fn test_edge_without_node_titles_uses_ids() {
        let items = vec![Evidence::Edge {
            edge: Edge::new("a", "b", Relationship::RelatesTo),
            score: 0.5,
        }];
        let answer = TemplateComposer::new().compose("a", &items).unwrap();
        assert_eq!(answer, "a relates_to b.");
    }
}

//! Graph extraction from documents.
//!
//! A [`GraphExtractor`] maps one [`Document`] to a document node, the
//! entity nodes it mentions, and the edges between them. Extraction is
//! also where schema validation happens: a document that cannot be mapped
//! yields a `Parse` error naming the document.
//!
//! [`EntityExtractor`] is the built-in heuristic implementation. It treats
//! runs of capitalized words as entity names ("Ada Lovelace",
//! "Analytical Engine"), links the document to every entity it mentions,
//! and links entities that appear in the same sentence.

use crate::stopwords::{StopwordFilter, TextConfig};
use crate::{Edge, Node, NodeKind, Relationship};
use graphrag_core::{Document, Error, Result, entity_id, normalize_id};
use std::collections::HashSet;
use std::sync::Arc;

/// Nodes and edges derived from a single document.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// The node representing the document itself.
    pub document: Option<Node>,
    /// Entity nodes mentioned by the document, in first-seen order.
    pub entities: Vec<Node>,
    /// Edges among the document and entity nodes.
    pub edges: Vec<Edge>,
}

/// Trait for turning documents into graph content.
pub trait GraphExtractor: Send + Sync {
    /// Extract graph content from a document.
    ///
    /// Returns a `Parse` error if the document cannot be mapped to the
    /// graph schema.
    fn extract(&self, doc: &Document) -> Result<Extraction>;
}

impl<T: GraphExtractor + ?Sized> GraphExtractor for &T {
    fn extract(&self, doc: &Document) -> Result<Extraction> {
        (**self).extract(doc)
    }
}

impl<T: GraphExtractor + ?Sized> GraphExtractor for Arc<T> {
    fn extract(&self, doc: &Document) -> Result<Extraction> {
        (**self).extract(doc)
    }
}

// ============================================================================
// EntityExtractor
// ============================================================================

/// Capitalized-phrase entity extractor.
#[derive(Debug)]
pub struct EntityExtractor {
    filter: StopwordFilter,
    max_entity_words: usize,
}

impl EntityExtractor {
    /// Create an extractor using the given text configuration.
    pub fn new(config: &TextConfig) -> Self {
        Self {
            filter: StopwordFilter::new(config),
            max_entity_words: 4,
        }
    }

    /// Sets the maximum number of words in one entity name.
    pub fn with_max_entity_words(mut self, max: usize) -> Self {
        self.max_entity_words = max.max(1);
        self
    }

    /// Find entity names in one sentence, in order of appearance.
    fn sentence_entities(&self, sentence: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in sentence.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            let word = word.split('\'').next().unwrap_or_default();
            let capitalized = word.chars().next().is_some_and(char::is_uppercase);

            if capitalized && run.len() < self.max_entity_words {
                run.push(word);
            } else {
                self.flush_run(&mut run, &mut names);
                if capitalized {
                    run.push(word);
                }
            }

            // Trailing punctuation (commas, colons, ...) ends a name.
            let ends_phrase = raw
                .chars()
                .last()
                .is_some_and(|c| !c.is_alphanumeric() && c != '\'');
            if ends_phrase {
                self.flush_run(&mut run, &mut names);
            }
        }
        self.flush_run(&mut run, &mut names);

        names
    }

    fn flush_run(&self, run: &mut Vec<&str>, names: &mut Vec<String>) {
        let start = run
            .iter()
            .position(|w| !self.filter.is_stopword(w))
            .unwrap_or(run.len());
        let end = run
            .iter()
            .rposition(|w| !self.filter.is_stopword(w))
            .map_or(start, |i| i + 1);

        if start < end {
            let name = run[start..end].join(" ");
            if name.chars().count() >= 2 {
                names.push(name);
            }
        }
        run.clear();
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(&TextConfig::default())
    }
}

impl GraphExtractor for EntityExtractor {
    fn extract(&self, doc: &Document) -> Result<Extraction> {
        let doc_id = normalize_id(&doc.id);
        if doc_id.is_empty() {
            return Err(Error::parse("document has an empty id"));
        }
        if doc.text.trim().is_empty() {
            return Err(Error::parse(format!("document '{doc_id}' has no text")));
        }

        let mut document = Node::new(doc_id.clone(), doc.display_title())
            .with_kind(NodeKind::Document)
            .with_text(doc.text.clone())
            .with_source(doc_id.clone());
        if let Some(category) = doc.metadata.get("category").and_then(|v| v.as_str()) {
            document = document.with_category(category);
        }
        for (key, value) in &doc.metadata {
            document = document.with_metadata(key.clone(), value.clone());
        }

        let mut entities: Vec<Node> = Vec::new();
        let mut seen_entities: HashSet<String> = HashSet::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut seen_edges: HashSet<(String, String, String)> = HashSet::new();

        for sentence in doc.text.split(['.', '!', '?', ';', '\n']) {
            let mut in_sentence: Vec<String> = Vec::new();

            for name in self.sentence_entities(sentence) {
                let id = entity_id(&name);
                if seen_entities.insert(id.clone()) {
                    entities.push(Node::new(id.clone(), name).with_source(doc_id.clone()));
                    let mention = Edge::new(doc_id.clone(), id.clone(), Relationship::Mentions);
                    seen_edges.insert(mention.key());
                    edges.push(mention);
                }
                if !in_sentence.contains(&id) {
                    in_sentence.push(id);
                }
            }

            for (i, a) in in_sentence.iter().enumerate() {
                for b in &in_sentence[i + 1..] {
                    let (from, to) = if a < b { (a, b) } else { (b, a) };
                    let edge = Edge::new(from.clone(), to.clone(), Relationship::CoOccurs);
                    if seen_edges.insert(edge.key()) {
                        edges.push(edge);
                    }
                }
            }
        }

        log::debug!(
            "Extracted {} entities and {} edges from '{doc_id}'",
            entities.len(),
            edges.len()
        );

        Ok(Extraction {
            document: Some(document),
            entities,
            edges,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Extraction {
        EntityExtractor::default()
            .extract(&Document::new("Doc A", text))
            .unwrap()
    }

    fn entity_titles(extraction: &Extraction) -> Vec<&str> {
        extraction
            .entities
            .iter()
            .map(|n| n.title.as_str())
            .collect()
    }

    #[test]
    fn test_extracts_multiword_entities() {
        let ex = extract("Ada Lovelace corresponded with Charles Babbage about the engine.");
        assert_eq!(entity_titles(&ex), vec!["Ada Lovelace", "Charles Babbage"]);
    }

    #[test]
    fn test_strips_leading_stopwords_from_names() {
        let ex = extract("Later, The Analytical Engine was designed in London.");
        let titles = entity_titles(&ex);
        assert!(titles.contains(&"Analytical Engine"));
        assert!(titles.contains(&"London"));
        assert!(!titles.iter().any(|t| t.starts_with("The")));
    }

    #[test]
    fn test_comma_separates_entities() {
        let ex = extract("Babbage, Lovelace and Menabrea met.");
        assert_eq!(entity_titles(&ex), vec!["Babbage", "Lovelace", "Menabrea"]);
    }

    #[test]
    fn test_document_node() {
        let doc = Document::new("Doc A", "Babbage lived in London.")
            .with_title("Babbage Notes")
            .with_metadata("category", "biography");
        let ex = EntityExtractor::default().extract(&doc).unwrap();

        let node = ex.document.unwrap();
        assert_eq!(node.id, "doc-a");
        assert_eq!(node.title, "Babbage Notes");
        assert_eq!(node.kind, NodeKind::Document);
        assert_eq!(node.category.as_deref(), Some("biography"));
        assert_eq!(node.text.as_deref(), Some("Babbage lived in London."));
    }

    #[test]
    fn test_mention_and_cooccurrence_edges() {
        let ex = extract("Babbage met Lovelace. Lovelace visited London.");

        let mentions = ex
            .edges
            .iter()
            .filter(|e| e.relationship == Relationship::Mentions)
            .count();
        assert_eq!(mentions, 3);

        let co: Vec<(&str, &str)> = ex
            .edges
            .iter()
            .filter(|e| e.relationship == Relationship::CoOccurs)
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(
            co,
            vec![
                ("entity:babbage", "entity:lovelace"),
                ("entity:london", "entity:lovelace"),
            ]
        );
    }

    #[test]
    fn test_repeated_entity_is_single_node() {
        let ex = extract("Babbage built it. Babbage improved it.");
        assert_eq!(ex.entities.len(), 1);
        assert_eq!(ex.entities[0].sources, vec!["doc-a".to_string()]);
    }

    #[test]
    fn test_empty_id_is_schema_error() {
        let err = EntityExtractor::default()
            .extract(&Document::new("  ", "Babbage"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_blank_text_is_schema_error() {
        let err = EntityExtractor::default()
            .extract(&Document::new("doc", " \n "))
            .unwrap_err();
        assert!(err.to_string().contains("has no text"));
    }

    #[test]
    fn test_max_entity_words_splits_long_runs() {
        let extractor = EntityExtractor::default().with_max_entity_words(2);
        let ex = extractor
            .extract(&Document::new("d", "Royal Astronomical Society Gold Medal"))
            .unwrap();
        let titles = entity_titles(&ex);
        assert_eq!(titles, vec!["Royal Astronomical", "Society Gold", "Medal"]);
    }
}

//! Input document representation.
//!
//! A `Document` is the unit of ingestible content handed to a query engine:
//! an identifier, optional title, text body, and free-form metadata.
//!
//! ```rust
//! use graphrag_core::Document;
//!
//! let doc = Document::new("ada", "Ada Lovelace worked with Charles Babbage.")
//!     .with_title("Ada Lovelace")
//!     .with_metadata("year", 1843);
//!
//! assert_eq!(doc.id, "ada");
//! assert_eq!(doc.display_title(), "Ada Lovelace");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document to be ingested into a knowledge graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier (required, non-empty).
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// Text body.
    pub text: String,
    /// Free-form metadata (source path, author, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Document {
    /// Creates a document with the given ID and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
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

    /// Title if present, otherwise the ID.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("doc-a", "Some text")
            .with_title("Doc A")
            .with_metadata("path", "/tmp/doc-a.md");

        assert_eq!(doc.id, "doc-a");
        assert_eq!(doc.title.as_deref(), Some("Doc A"));
        assert_eq!(doc.text, "Some text");
        assert_eq!(doc.metadata["path"], "/tmp/doc-a.md");
    }

    #[test]
    fn test_display_title_falls_back_to_id() {
        let doc = Document::new("untitled", "text");
        assert_eq!(doc.display_title(), "untitled");
    }

    #[test]
    fn test_document_deserialization_defaults() {
        let json = r#"{"id": "x", "text": "hello"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.title.is_none());
        assert!(doc.metadata.is_empty());
    }
}

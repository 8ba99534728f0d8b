//! Query options.
//!
//! Callers pass options as an open JSON map so new keys never change the
//! engine signature. The map is parsed into [`QueryOptions`] on top of
//! the engine's defaults; unrecognized keys and ill-typed values are
//! translation errors rather than being silently ignored.

use crate::error::{Error, Result};
use graphrag_graph::MAX_BFS_DEPTH;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the engine produces the `answer` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Compose a short answer from the top evidence.
    #[default]
    Template,
    /// Entity-lookup mode: return evidence only.
    #[serde(rename = "none", alias = "lookup")]
    Lookup,
}

/// Typed query options.
///
/// ```rust
/// use graphrag_query::QueryOptions;
/// use serde_json::json;
///
/// let map = json!({"max_hops": 2}).as_object().cloned().unwrap();
/// let options = QueryOptions::default().merged(&map).unwrap();
/// assert_eq!(options.max_hops, 2);
/// assert!(options.include_paths);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryOptions {
    /// Traversal depth from seed nodes (0 = seeds only).
    pub max_hops: usize,
    /// Minimum seed match score in [0, 1].
    pub similarity_threshold: f32,
    /// Emit multi-hop `Path` evidence.
    pub include_paths: bool,
    /// Emit `Edge` evidence between evidence nodes.
    pub include_edges: bool,
    /// Answer composition mode.
    pub answer_mode: AnswerMode,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_hops: 1,
            similarity_threshold: 0.0,
            include_paths: true,
            include_edges: true,
            answer_mode: AnswerMode::default(),
        }
    }
}

impl QueryOptions {
    /// Parse options from a map, using the built-in defaults for missing keys.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Self::default().merged(map)
    }

    /// Overlay `overrides` on these options.
    ///
    /// Fails with `QueryTranslation` on unknown keys, wrong types, or a
    /// threshold outside [0, 1], including one inherited from `self`.
    /// `max_hops` above the traversal limit is capped.
    pub fn merged(&self, overrides: &Map<String, Value>) -> Result<Self> {
        if overrides.is_empty() {
            return self.clone().validated();
        }

        let mut base = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(Error::translation(format!("invalid query options: {e}"))),
        };
        for (key, value) in overrides {
            if !base.contains_key(key) {
                return Err(Error::translation(format!("unknown query option '{key}'")));
            }
            base.insert(key.clone(), value.clone());
        }

        let options: Self = serde_json::from_value(Value::Object(base))
            .map_err(|e| Error::translation(format!("invalid query options: {e}")))?;
        options.validated()
    }

    /// Check ranges, capping `max_hops`.
    pub fn validated(mut self) -> Result<Self> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::translation(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.max_hops > MAX_BFS_DEPTH {
            log::debug!("Capping max_hops {} to {MAX_BFS_DEPTH}", self.max_hops);
            self.max_hops = MAX_BFS_DEPTH;
        }
        Ok(self)
    }

    /// Sets the traversal depth.
    pub fn with_max_hops(mut self, hops: usize) -> Self {
        self.max_hops = hops;
        self
    }

    /// Sets the seed score threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Sets the answer mode.
    pub fn with_answer_mode(mut self, mode: AnswerMode) -> Self {
        self.answer_mode = mode;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = QueryOptions::from_map(&Map::new()).unwrap();
        assert_eq!(options, QueryOptions::default());
        assert_eq!(options.max_hops, 1);
        assert_eq!(options.answer_mode, AnswerMode::Template);
    }

    #[test]
    fn test_all_keys() {
        let options = QueryOptions::from_map(&map(json!({
            "max_hops": 3,
            "similarity_threshold": 0.5,
            "include_paths": false,
            "include_edges": false,
            "answer_mode": "none"
        })))
        .unwrap();

        assert_eq!(options.max_hops, 3);
        assert_eq!(options.similarity_threshold, 0.5);
        assert!(!options.include_paths);
        assert!(!options.include_edges);
        assert_eq!(options.answer_mode, AnswerMode::Lookup);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = QueryOptions::from_map(&map(json!({"top_k": 3}))).unwrap_err();
        assert!(matches!(err, Error::QueryTranslation(_)));
        assert!(err.to_string().contains("unknown query option 'top_k'"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = QueryOptions::from_map(&map(json!({"max_hops": "two"}))).unwrap_err();
        assert!(matches!(err, Error::QueryTranslation(_)));

        let err = QueryOptions::from_map(&map(json!({"max_hops": -1}))).unwrap_err();
        assert!(matches!(err, Error::QueryTranslation(_)));
    }

    #[test]
    fn test_threshold_range() {
        let err =
            QueryOptions::from_map(&map(json!({"similarity_threshold": 1.5}))).unwrap_err();
        assert!(err.to_string().contains("similarity_threshold"));

        let ok = QueryOptions::from_map(&map(json!({"similarity_threshold": 1}))).unwrap();
        assert_eq!(ok.similarity_threshold, 1.0);
    }

    #[test]
    fn test_max_hops_capped() {
        let options = QueryOptions::from_map(&map(json!({"max_hops": 50}))).unwrap();
        assert_eq!(options.max_hops, MAX_BFS_DEPTH);
    }

    #[test]
    fn test_merged_keeps_base() {
        let base = QueryOptions::default().with_max_hops(2);
        let options = base.merged(&map(json!({"include_edges": false}))).unwrap();
        assert_eq!(options.max_hops, 2);
        assert!(!options.include_edges);
    }

    #[test]
    fn test_empty_overrides_still_validate_base() {
        let base = QueryOptions::default().with_similarity_threshold(5.0);
        let err = base.merged(&Map::new()).unwrap_err();
        assert!(matches!(err, Error::QueryTranslation(_)));

        let capped = QueryOptions::default().with_max_hops(40).merged(&Map::new()).unwrap();
        assert_eq!(capped.max_hops, MAX_BFS_DEPTH);
    }

    #[test]
    fn test_bad_answer_mode() {
        let err = QueryOptions::from_map(&map(json!({"answer_mode": "llm"}))).unwrap_err();
        assert!(matches!(err, Error::QueryTranslation(_)));
    }

    #[test]
    fn test_lookup_alias() {
        let options = QueryOptions::from_map(&map(json!({"answer_mode": "lookup"}))).unwrap();
        assert_eq!(options.answer_mode, AnswerMode::Lookup);
    }
}

//! Tokenization and stopword filtering.
//!
//! Both the term index and the entity extractor need the same notion of a
//! "meaningful word". Stopwords come from the `stop-words` crate's English
//! list, extended by [`TextConfig::custom_stopwords`] and overridden by
//! [`TextConfig::allowlist`].
//!
//! ```rust
//! use graphrag_graph::stopwords::StopwordFilter;
//! use graphrag_graph::TextConfig;
//!
//! let filter = StopwordFilter::new(&TextConfig::default());
//! assert_eq!(filter.terms("Who is Babbage?"), vec!["babbage".to_string()]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stop_words::{LANGUAGE, get};

/// Text processing configuration shared by indexing and extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Enable stopword filtering.
    #[serde(default = "default_true")]
    pub stopwords_enabled: bool,

    /// Additional lowercase words to treat as stopwords.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Words that are never treated as stopwords (case-insensitive).
    #[serde(default)]
    pub allowlist: Vec<String>,

    /// Minimum term length in characters.
    #[serde(default = "default_min_term_len")]
    pub min_term_len: usize,
}

fn default_true() -> bool {
    true
}

fn default_min_term_len() -> usize {
    2
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stopwords_enabled: default_true(),
            custom_stopwords: Vec::new(),
            allowlist: Vec::new(),
            min_term_len: default_min_term_len(),
        }
    }
}

/// Split text into lowercase alphanumeric words.
///
/// Apostrophe suffixes (`Babbage's`) are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| word.split('\'').next().unwrap_or_default())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Stopword filter for term extraction.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    allowlist: HashSet<String>,
    enabled: bool,
    min_term_len: usize,
}

impl StopwordFilter {
    /// Create a new stopword filter from configuration.
    pub fn new(config: &TextConfig) -> Self {
        let mut stopwords: HashSet<String> = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        for word in &config.custom_stopwords {
            stopwords.insert(word.to_lowercase());
        }

        let allowlist: HashSet<String> =
            config.allowlist.iter().map(|s| s.to_lowercase()).collect();

        Self {
            stopwords,
            allowlist,
            enabled: config.stopwords_enabled,
            min_term_len: config.min_term_len,
        }
    }

    /// Check if a word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let lower = word.to_lowercase();
        if self.allowlist.contains(&lower) {
            return false;
        }
        self.stopwords.contains(&lower)
    }

    /// Tokenize text and keep only meaningful terms, deduplicated in
    /// first-seen order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        tokenize(text)
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_term_len || self.allowlist.contains(t))
            .filter(|t| !self.is_stopword(t))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(&TextConfig::default())
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("enabled", &self.enabled)
            .field("stopword_count", &self.stopwords.len())
            .field("allowlist_count", &self.allowlist.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

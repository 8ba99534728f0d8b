//! Engine configuration.

use crate::options::QueryOptions;
use graphrag_graph::{ErrorHandling, TextConfig};
use serde::{Deserialize, Serialize};

/// Configuration for [`GraphRagEngine`](crate::GraphRagEngine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name used in logs and lifecycle messages.
    pub name: String,
    /// Policy for malformed documents during `init_db`.
    pub error_handling: ErrorHandling,
    /// Maximum number of words in an extracted entity name.
    pub max_entity_words: usize,
    /// Tokenization and stopword settings.
    pub text: TextConfig,
    /// Default query options; per-call options override these.
    pub query: QueryOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "graphrag".to_string(),
            error_handling: ErrorHandling::default(),
            max_entity_words: 4,
            text: TextConfig::default(),
            query: QueryOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the engine name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the schema error policy.
    pub fn with_error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Sets the default query options.
    pub fn with_query_defaults(mut self, query: QueryOptions) -> Self {
        self.query = query;
        self
    }
}

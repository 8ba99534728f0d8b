//! CLI configuration.
//!
//! Loaded from TOML via [`ConfigManager`]: an explicit `--config` path
//! wins, then `GRAPHRAG_CONFIG`, then the platform config directory.
//!
//! ```toml
//! [store]
//! backend = "file"
//! path = "/var/lib/graphrag/graph.json"
//!
//! [query]
//! max_hops = 2
//! answer_mode = "template"
//!
//! [build]
//! skip_invalid = true
//! ```

use graphrag_core::{ConfigManager, Error, Result};
use graphrag_graph::{ErrorHandling, FileStore, GraphStore, MemoryStore, TextConfig};
use graphrag_query::{EngineConfig, QueryOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration for the `graphrag` CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphRagConfig {
    /// Graph persistence.
    pub store: StoreConfig,
    /// Default query options.
    pub query: QueryOptions,
    /// Graph construction.
    pub build: BuildConfig,
}

/// Which store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local; nothing persists between commands.
    Memory,
    /// JSON snapshot file.
    #[default]
    File,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store backend.
    pub backend: StoreBackend,
    /// Snapshot path for the file backend; defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `[build]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Skip malformed documents instead of failing the build.
    pub skip_invalid: bool,
    /// Maximum words in an extracted entity name.
    pub max_entity_words: usize,
    /// Tokenization and stopwords.
    pub text: TextConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            skip_invalid: false,
            max_entity_words: 4,
            text: TextConfig::default(),
        }
    }
}

impl ConfigManager for GraphRagConfig {
    fn project_name() -> &'static str {
        "graphrag"
    }
}

impl GraphRagConfig {
    /// Resolve the snapshot path for the file backend.
    pub fn graph_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store.path {
            return Ok(PathBuf::from(path));
        }
        dirs::data_dir()
            .map(|dir| dir.join(Self::project_name()).join("graph.json"))
            .ok_or_else(|| Error::config("Could not determine data directory for this platform"))
    }

    /// Create the configured store.
    pub fn create_store(&self) -> Result<Arc<dyn GraphStore>> {
        match self.store.backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::File => Ok(Arc::new(FileStore::new(self.graph_path()?))),
        }
    }

    /// Engine configuration derived from this config.
    ///
    /// Rejects `[query]` defaults that a per-call override could not set.
    pub fn engine_config(&self, skip_invalid: bool) -> Result<EngineConfig> {
        let query = self
            .query
            .clone()
            .validated()
            .map_err(|e| Error::config(format!("Invalid [query] section: {e}")))?;
        let error_handling = if skip_invalid || self.build.skip_invalid {
            ErrorHandling::Skip
        } else {
            ErrorHandling::FailFast
        };
        Ok(EngineConfig {
            name: Self::project_name().to_string(),
            error_handling,
            max_entity_words: self.build.max_entity_words,
            text: self.build.text.clone(),
            query,
        })
    }
}

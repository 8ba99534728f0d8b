//! Graph store trait and built-in backends.
//!
//! A [`GraphStore`] persists the committed graph. The query engine builds
//! each new graph in memory and hands the finished result to
//! [`GraphStore::commit`]; stores never see a partially built graph.
//!
//! # Backends
//!
//! - [`MemoryStore`]: keeps the last committed snapshot in memory
//! - [`FileStore`]: JSON snapshot on disk, replaced via temp file + rename

use crate::{GraphData, GraphSnapshot};
use async_trait::async_trait;
use graphrag_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// On-disk format version written by [`FileStore`].
pub const FILE_FORMAT_VERSION: u32 = 1;

/// Abstract persistence backend for graphs.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Get the store name for diagnostics.
    fn name(&self) -> &str;

    /// Verify the store is reachable.
    ///
    /// Called before any graph is derived; an error here means nothing
    /// was built or committed.
    async fn connect(&self) -> Result<()>;

    /// Load the last committed graph, if any.
    async fn load(&self) -> Result<Option<GraphData>>;

    /// Persist a complete graph, replacing the previous one.
    async fn commit(&self, graph: &GraphData) -> Result<()>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Option<GraphSnapshot>>,
}

impl MemoryStore {
    /// Create an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn load(&self) -> Result<Option<GraphData>> {
        match self.snapshot.read().await.clone() {
            Some(snapshot) => GraphData::from_snapshot(snapshot).map(Some),
            None => Ok(None),
        }
    }

    async fn commit(&self, graph: &GraphData) -> Result<()> {
        *self.snapshot.write().await = Some(graph.to_snapshot());
        Ok(())
    }
}

// ============================================================================
// FileStore
// ============================================================================

#[derive(Serialize, Deserialize)]
struct GraphFile {
    version: u32,
    #[serde(flatten)]
    snapshot: GraphSnapshot,
}

/// JSON file store.
///
/// The parent directory must already exist; the store does not create
/// it, so a mistyped path surfaces as a connection error instead of a
/// silently created directory tree.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl GraphStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn connect(&self) -> Result<()> {
        let dir = self.parent_dir();
        let meta = tokio::fs::metadata(&dir)
            .await
            .map_err(|e| Error::io_with_path(e, &dir))?;
        if !meta.is_dir() {
            return Err(Error::config(format!(
                "graph store parent is not a directory: {}",
                dir.display()
            )));
        }
        if tokio::fs::metadata(&self.path)
            .await
            .is_ok_and(|m| m.is_dir())
        {
            return Err(Error::config(format!(
                "graph store path is a directory: {}",
                self.path.display()
            )));
        }
        Ok(())
    }

    async fn load(&self) -> Result<Option<GraphData>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io_with_path(e, &self.path)),
        };

        let file: GraphFile = serde_json::from_str(&json)
            .map_err(|e| Error::parse(format!("Failed to parse graph file: {e}")))?;
        if file.version != FILE_FORMAT_VERSION {
            return Err(Error::parse(format!(
                "unsupported graph file version {} (expected {FILE_FORMAT_VERSION})",
                file.version
            )));
        }

        let graph = GraphData::from_snapshot(file.snapshot)?;
        log::info!(
            "Loaded graph: {} nodes, {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            self.path.display()
        );
        Ok(Some(graph))
    }

    async fn commit(&self, graph: &GraphData) -> Result<()> {
        let file = GraphFile {
            version: FILE_FORMAT_VERSION,
            snapshot: graph.to_snapshot(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::operation(format!("Failed to serialize graph: {e}")))?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| Error::io_with_path(e, &tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))?;

        log::info!(
            "Saved graph: {} nodes, {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            self.path.display()
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Load text files from a directory as documents.
//!
//! Markdown (`*.md`) and plain text (`*.txt`) files are discovered
//! recursively and returned in sorted path order. The document ID is the
//! normalized path relative to the root without its extension
//! (`notes/Ada.md` becomes `notes/ada`); when two files share that ID the
//! later one keeps its extension (`notes/ada.txt`). The title is the
//! first `# ` heading, if any.

use graphrag_core::{Document, Error, Result, id_from_path, normalize_id};
use graphrag_graph::BuildError;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// File patterns loaded as documents.
pub const PATTERNS: &[&str] = &["**/*.md", "**/*.txt"];

/// Documents loaded from a directory, plus files that could not be read.
#[derive(Debug, Default)]
pub struct Corpus {
    /// Loaded documents in path order.
    pub documents: Vec<Document>,
    /// Unreadable files, keyed by path.
    pub skipped: Vec<BuildError>,
}

/// Discover document files under `root`, sorted.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::not_found("directory", root.display().to_string()));
    }

    let mut files = Vec::new();
    for pattern in PATTERNS {
        let full_pattern = root.join(pattern);
        let entries = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| Error::parse(format!("Invalid glob pattern: {e}")))?;
        files.extend(entries.filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            _ => None,
        }));
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// First level-one markdown heading in the text.
pub fn first_heading(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Document ID for `path` relative to `root`, without the extension.
pub fn document_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let stem = id_from_path(relative)?;
    let mut parts: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(name) => name.to_str().map(normalize_id),
            _ => None,
        })
        .filter(|part| !part.is_empty())
        .collect();
    parts.push(stem);
    Some(parts.join("/"))
}

/// Load one file as a document with the given ID.
pub fn load_document(path: &Path, id: impl Into<String>) -> Result<Document> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;

    let mut doc = Document::new(id, text.clone()).with_metadata("path", path.display().to_string());
    if let Some(title) = first_heading(&text) {
        doc = doc.with_title(title);
    }
    Ok(doc)
}

/// Load every document file under `root`.
///
/// With `skip_unreadable`, files that cannot be read as UTF-8 text are
/// reported in [`Corpus::skipped`]; otherwise the first one fails the load.
pub fn load_documents(root: &Path, skip_unreadable: bool) -> Result<Corpus> {
    let files = discover_files(root)?;
    let mut corpus = Corpus::default();
    let mut taken: HashSet<String> = HashSet::new();

    for path in &files {
        let base = document_id(root, path)
            .ok_or_else(|| Error::parse(format!("Cannot derive an id from {}", path.display())))?;
        let id = if taken.contains(&base) {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            format!("{base}.{}", ext.to_lowercase())
        } else {
            base
        };

        match load_document(path, id.clone()) {
            Ok(doc) => {
                taken.insert(id);
                corpus.documents.push(doc);
            }
            Err(e) if skip_unreadable => {
                log::warn!("Skipping {}: {e}", path.display());
                corpus.skipped.push(BuildError {
                    document_id: path.display().to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Loaded {} documents from {} ({} skipped)",
        corpus.documents.len(),
        root.display(),
        corpus.skipped.len()
    );
    Ok(corpus)
}

//! ID normalization utilities.
//!
//! Graph node IDs are lowercase kebab-case strings. Documents keep the ID
//! the caller gave them (normalized); entities derived from text get an
//! `entity:` prefix so they never collide with document IDs.

use std::path::Path;

/// Prefix applied to IDs of entity nodes extracted from text.
pub const ENTITY_PREFIX: &str = "entity:";

/// Normalize an identifier to lowercase kebab-case.
///
/// Trims, lowercases, treats underscores as whitespace, and joins the
/// remaining words with single hyphens.
///
/// # Examples
///
/// ```
/// use graphrag_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Ada Lovelace"), "ada-lovelace");
/// assert_eq!(normalize_id("analytical_engine"), "analytical-engine");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Compute the node ID for an entity name.
///
/// ```
/// use graphrag_core::util::ids::entity_id;
///
/// assert_eq!(entity_id("Charles Babbage"), "entity:charles-babbage");
/// ```
pub fn entity_id(name: &str) -> String {
    format!("{ENTITY_PREFIX}{}", normalize_id(name))
}

/// Returns `true` if the ID belongs to an extracted entity node.
pub fn is_entity_id(id: &str) -> bool {
    id.starts_with(ENTITY_PREFIX)
}

/// Compute an ID from a file path's stem.
///
/// Returns `None` if the path has no file stem.
///
/// ```
/// use std::path::Path;
/// use graphrag_core::util::ids::id_from_path;
///
/// assert_eq!(
///     id_from_path(Path::new("/corpus/Ada_Lovelace.md")),
///     Some("ada-lovelace".to_string())
/// );
/// assert_eq!(id_from_path(Path::new("/")), None);
/// ```
pub fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(normalize_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // normalize_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_normalize_id_simple() {
        assert_eq!(normalize_id("babbage"), "babbage");
    }

    #[test]
    fn test_normalize_id_mixed_separators() {
        assert_eq!(normalize_id("difference_engine No 2"), "difference-engine-no-2");
    }

    #[test]
    fn test_normalize_id_empty() {
        assert_eq!(normalize_id(""), "");
        assert_eq!(normalize_id("   "), "");
    }

    // -------------------------------------------------------------------------
    // entity id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_entity_id_prefix() {
        let id = entity_id("London");
        assert_eq!(id, "entity:london");
        assert!(is_entity_id(&id));
        assert!(!is_entity_id("doc-a"));
    }

    // -------------------------------------------------------------------------
    // id_from_path tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_id_from_path_nested() {
        let path = Path::new("/corpus/people/Grace Hopper.txt");
        assert_eq!(id_from_path(path), Some("grace-hopper".to_string()));
    }

    #[test]
    fn test_id_from_path_no_extension() {
        let path = Path::new("/corpus/NOTES");
        assert_eq!(id_from_path(path), Some("notes".to_string()));
    }
}

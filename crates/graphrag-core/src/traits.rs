//! Shared traits.
//!
//! [`ConfigManager`] gives any TOML-backed configuration type a uniform way
//! to locate, load, render, and export itself. The CLI's `config`
//! subcommands are written against this trait.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// A TOML configuration file with a well-known location.
///
/// Path resolution order: explicit path, then the `<PROJECT>_CONFIG`
/// environment variable, then `<config_dir>/<project>/config.toml`.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Name of the environment variable that overrides the config path.
    fn config_env_var() -> String {
        format!(
            "{}_CONFIG",
            Self::project_name().to_uppercase().replace(['-', ' '], "_")
        )
    }

    /// Platform default config file path.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file path applies.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(Self::config_env_var()) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load the configuration.
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed file is an error.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("No config directory available; using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            log::debug!("Config file {} not found; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Render the configuration as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten the configuration into `PROJECT_SECTION_KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let prefix = Self::project_name().to_uppercase().replace(['-', ' '], "_");
        let mut vars = Vec::new();
        flatten_env(&prefix, &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        #[serde(default)]
        store: TestStore,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestStore {
        backend: String,
        hops: i64,
    }

    impl Default for TestStore {
        fn default() -> Self {
            Self {
                backend: "memory".to_string(),
                hops: 1,
            }
        }
    }

    impl ConfigManager for TestConfig {
        fn project_name() -> &'static str {
            "graphrag-test"
        }
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(TestConfig::config_env_var(), "GRAPHRAG_TEST_CONFIG");
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = TestConfig::resolve_config_path(Some("/etc/custom.toml"));
        assert_eq!(path, Some(PathBuf::from("/etc/custom.toml")));
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = TestConfig::load(path.to_str()).unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nbackend = \"file\"\nhops = 3\n").unwrap();

        let config = TestConfig::load(path.to_str()).unwrap();
        assert_eq!(config.store.backend, "file");
        assert_eq!(config.store.hops, 3);
    }

    #[test]
    fn test_load_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store\nbackend = ").unwrap();

        let err = TestConfig::load(path.to_str()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_to_env_vars() {
        let vars = TestConfig::default().to_env_vars().unwrap();
        assert!(vars.contains(&(
            "GRAPHRAG_TEST_STORE_BACKEND".to_string(),
            "memory".to_string()
        )));
        assert!(vars.contains(&("GRAPHRAG_TEST_STORE_HOPS".to_string(), "1".to_string())));
    }

    #[test]
    fn test_to_toml_string_roundtrips_sections() {
        let toml_str = TestConfig::default().to_toml_string().unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("backend = \"memory\""));
    }
}

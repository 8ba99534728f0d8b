//! Handlers for the `graphrag config` subcommands.
//!
//! The `cmd_config_*` functions are generic over [`ConfigManager`] so a
//! downstream binary can reuse them with its own configuration type. The
//! dotted-key helpers operate on plain [`toml::Value`] trees.

use crate::cli::ConfigAction;
use crate::config::GraphRagConfig;
use graphrag_core::traits::ConfigManager;
use graphrag_core::{Error, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Dispatch
// ============================================================================

/// Run a `config` subcommand against [`GraphRagConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<GraphRagConfig>(config_path),
        ConfigAction::Show => {
            let config = GraphRagConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        ConfigAction::Get { key } => cmd_config_get::<GraphRagConfig>(config_path, &key),
        ConfigAction::Set { key, value } => {
            cmd_config_set::<GraphRagConfig>(config_path, &key, &value)
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init::<GraphRagConfig>(file.as_deref(), force)
        }
        ConfigAction::Export { docker_env } => {
            let config = GraphRagConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Generic handlers
// ============================================================================

/// Print the config file path that would be used.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(not created yet; run `{} config init`)",
            C::project_name()
        );
    }
    Ok(())
}

/// Print one value from the effective configuration.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = C::load(config_path)?;
    let tree = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let value = get_nested_value(&tree, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    println!("{}", format_toml_value(value));
    Ok(())
}

/// Write one value into the config file.
///
/// The edited file must still deserialize as `C`, so a typo in a key or a
/// wrongly typed value is rejected before anything is written.
pub fn cmd_config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let mut doc = read_toml(&path)?;
    set_nested_value(&mut doc, key, parse_value(value))?;

    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<C>(&rendered)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Write a default config file.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    std::fs::write(&path, C::default().to_toml_string()?)
        .map_err(|e| Error::io_with_path(e, &path))?;
    println!("Config file created at {}", path.display());
    Ok(())
}

/// Print the configuration as environment variable assignments.
pub fn cmd_config_export<C: ConfigManager>(config: &C, docker_env: bool) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            println!("--env {key}={value}");
        } else {
            println!("{key}={value}");
        }
    }
    Ok(())
}

fn read_toml(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

/// Look up `a.b.c` in a TOML tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set `a.b.c` in a TOML tree, creating missing tables on the way.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::config(format!("Invalid key '{key}'")));
    }
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| Error::config("Empty key path"))?;

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot descend into non-table '{part}'")))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a command-line value: bool, then integer, then float, then string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| s.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Render a TOML value for stdout; strings are printed unquoted.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

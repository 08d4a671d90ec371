use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::models::UsagePattern;

/// Root configuration structure, deserialized from `.license-importr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The application the imported components belong to.
    pub application: ApplicationConfig,
    /// Inventory sources to import, in order.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    #[serde(default)]
    pub release: String,
}

/// One license-listing file to import.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Importer type token (e.g. `"yarn"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Source locator: a path, optionally prefixed with `file:`.
    /// Relative paths resolve against the project path.
    pub source: String,
    pub usage: UsagePattern,
    pub repo_type: String,
    /// Free-form importer parameters, accepted for every source and
    /// interpreted (or ignored) by the selected importer.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-importr/config.toml`
/// 3. `~/.config/license-importr/config.toml`
///
/// There is no built-in default: sources have to be named explicitly.
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".license-importr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-importr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    bail!(
        "no config file found for {}; pass --config or create .license-importr/config.toml",
        project_path.display()
    )
}

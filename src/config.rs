//! Configuration management module
//!
//! One YAML document holding the run policy. Every section is optional;
//! missing keys take their defaults.

use std::path::{Path, PathBuf};

use action_flow::AutofillPolicyView;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

/// Application configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabfillConfig {
    /// Policy for every autofill run
    pub autofill: AutofillPolicyView,
}

impl TabfillConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("parsing configuration")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing configuration")
    }
}

/// Configuration together with the path it was looked up at
pub struct LoadedConfig {
    pub config: TabfillConfig,
    pub path: PathBuf,
    /// False when the file was absent and defaults are in effect
    pub from_file: bool,
}

/// Default lookup location: `<config dir>/tabfill/config.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("tabfill");
    path.push("config.yaml");
    Ok(path)
}

pub async fn load_config(config_path: Option<&Path>) -> Result<LoadedConfig> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    if !fs::try_exists(&path).await.unwrap_or(false) {
        if config_path.is_some() {
            warn!(path = %path.display(), "configuration file not found; using defaults");
        }
        return Ok(LoadedConfig {
            config: TabfillConfig::default(),
            path,
            from_file: false,
        });
    }

    let raw = fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let config = TabfillConfig::from_yaml_str(&raw)
        .with_context(|| format!("loading {}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(LoadedConfig {
        config,
        path,
        from_file: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = TabfillConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.autofill.delay_ms, 0);
        assert!(config.autofill.select.wait_options);
        assert_eq!(config.autofill.typing.max_text_len, None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = "autofill:\n  delay_ms: 50\n  select:\n    allow_contains_fallback: false\n";
        let config = TabfillConfig::from_yaml_str(raw).unwrap();

        assert_eq!(config.autofill.delay_ms, 50);
        assert!(!config.autofill.select.allow_contains_fallback);
        assert!(config.autofill.select.value_first);
        assert_eq!(config.autofill.select.stability.timeout_ms, 500);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(TabfillConfig::from_yaml_str("autofill:\n  delay_ms: soon\n").is_err());
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let loaded = load_config(Some(&path)).await.unwrap();

        assert!(!loaded.from_file);
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.config.autofill.frame_ms, 16);
    }

    #[tokio::test]
    async fn file_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "autofill:\n  frame_ms: 8\n").unwrap();

        let loaded = load_config(Some(&path)).await.unwrap();

        assert!(loaded.from_file);
        assert_eq!(loaded.config.autofill.frame_ms, 8);
    }
}

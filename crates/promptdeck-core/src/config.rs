use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::notify::{Placement, DEFAULT_NOTIFICATION_DURATION};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// JSON file replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Where favorites are persisted.
    pub storage_path: Option<PathBuf>,
    /// tracing filter directive, e.g. "promptdeck=debug".
    pub log_filter: Option<String>,
    pub toast_duration_ms: Option<u64>,
    pub toast_placement: Option<Placement>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        self.toast_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_NOTIFICATION_DURATION)
    }

    pub fn toast_placement(&self) -> Placement {
        self.toast_placement.unwrap_or_default()
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("promptdeck").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::new());
        assert_eq!(config.toast_duration(), Duration::from_millis(2000));
        assert_eq!(config.toast_placement(), Placement::BottomRight);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promptdeck").join("config.json");
        let config = Config {
            catalog_path: Some(PathBuf::from("/tmp/prompts.json")),
            toast_duration_ms: Some(3500),
            toast_placement: Some(Placement::TopRight),
            ..Config::new()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"toast_placement": "bottom-center"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.toast_placement(), Placement::BottomCenter);
        assert_eq!(config.catalog_path, None);
    }
}

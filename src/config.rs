use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::get_default_download_dir;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_teardown_grace_ms")]
    pub teardown_grace_ms: u64,
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default = "default_icon_mode")]
    pub icon_mode: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_teardown_grace_ms() -> u64 {
    500
}

fn default_icon_mode() -> String {
    "emoji".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            teardown_grace_ms: default_teardown_grace_ms(),
            download_dir: None,
            icon_mode: default_icon_mode(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn teardown_grace(&self) -> Duration {
        Duration::from_millis(self.teardown_grace_ms)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(get_default_download_dir)
    }

    /// Load from the first config file found, or fall back to defaults
    pub fn load(cli_path: Option<String>) -> Result<Self> {
        match get_config_path(cli_path)? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file is a valid config with every default
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Resolve the config file: `--config` (must exist), then
/// `<config_dir>/trashcam/config.yaml`, then `./config.yaml`
pub fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("trashcam").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.teardown_grace(), Duration::from_millis(500));
        assert_eq!(config.icon_mode, "emoji");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("base_url: http://camera.local:8000\nicon_mode: nerdfont\n").unwrap();
        assert_eq!(config.base_url, "http://camera.local:8000");
        assert_eq!(config.icon_mode, "nerdfont");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_download_dir_override() {
        let config = Config::from_yaml("download_dir: /tmp/exports").unwrap();
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml("request_timeout_secs: soon").is_err());
    }

    #[test]
    fn test_missing_cli_config_is_error() {
        let err = get_config_path(Some("/definitely/not/here.yaml".to_string())).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}

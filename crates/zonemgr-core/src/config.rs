//! Configuration types for zonemgr
//!
//! One JSON file holds the credential and the knobs; every component
//! receives its settings explicitly at construction (no module-level
//! globals). Defaults match the long-standing behavior: 300s IP cache
//! TTL, 5 concurrent zone fetches, 3 rate-limit retry attempts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::cache::temp_path;
use crate::error::{Error, Result};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "zonemgr_config.json";

/// Top-level configuration, persisted as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Provider API bearer token (required)
    pub api_token: String,

    /// Provider account ID, when an operation needs one
    #[serde(default)]
    pub account_id: Option<String>,

    /// Webhook URL for notifications; none disables notification fan-out
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Locations of the flat files the tool maintains
    #[serde(default)]
    pub files: FilePaths,

    /// Freshness window for the cached public IP (seconds)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum simultaneous per-zone record fetches
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Total attempts for rate-limited provider calls
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Paths of the per-purpose flat files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePaths {
    /// Cached public IP entry
    #[serde(default = "default_ip_cache_file")]
    pub ip_cache: PathBuf,

    /// Auto-update registry mapping
    #[serde(default = "default_registry_file")]
    pub auto_update_registry: PathBuf,

    /// Append-only IP update history
    #[serde(default = "default_ip_history_file")]
    pub ip_history: PathBuf,

    /// Append-only change log
    #[serde(default = "default_change_log_file")]
    pub change_log: PathBuf,
}

impl Default for FilePaths {
    fn default() -> Self {
        Self {
            ip_cache: default_ip_cache_file(),
            auto_update_registry: default_registry_file(),
            ip_history: default_ip_history_file(),
            change_log: default_change_log_file(),
        }
    }
}

impl ManagerConfig {
    /// Create a configuration with defaults around the given token
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: None,
            webhook_url: None,
            files: FilePaths::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fetch_concurrency: default_fetch_concurrency(),
            max_retries: default_max_retries(),
        }
    }

    /// Load and validate the configuration from `path`
    ///
    /// A missing file is `ConfigMissing` (the caller exits with setup
    /// instructions before any network call); an unreadable file is a
    /// configuration error, not silently recovered.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::config_missing(format!(
                    "configuration file {} not found; run `zonemgr setup` first",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(Error::config(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let config: ManagerConfig = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!("failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate required fields and numeric ranges
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(Error::config_missing(
                "api_token is empty; run `zonemgr setup` or edit the configuration file",
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(Error::config("fetch_concurrency must be at least 1"));
        }
        if self.max_retries == 0 {
            return Err(Error::config("max_retries must be at least 1"));
        }
        Ok(())
    }

    /// Persist the configuration atomically
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let temp = temp_path(path);
        fs::write(&temp, json.as_bytes()).await?;
        fs::rename(&temp, path).await?;
        Ok(())
    }
}

fn default_ip_cache_file() -> PathBuf {
    PathBuf::from("ip_cache.json")
}

fn default_registry_file() -> PathBuf {
    PathBuf::from("auto_update_config.json")
}

fn default_ip_history_file() -> PathBuf {
    PathBuf::from("ip_history.json")
}

fn default_change_log_file() -> PathBuf {
    PathBuf::from("dns_change_history.log")
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_fetch_concurrency() -> usize {
    5
}

fn default_max_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn minimal_file_gets_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"api_token": "tok-1234567890"}"#)
            .await
            .unwrap();

        let config = ManagerConfig::load(&path).await.unwrap();
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.fetch_concurrency, 5);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.files.ip_cache, PathBuf::from("ip_cache.json"));
        assert!(config.webhook_url.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_config_missing() {
        let dir = tempdir().unwrap();
        let err = ManagerConfig::load(dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigMissing(_)));
    }

    #[tokio::test]
    async fn empty_token_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"api_token": "  "}"#).await.unwrap();

        let err = ManagerConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::ConfigMissing(_)));
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ManagerConfig::new("tok-1234567890");
        config.webhook_url = Some("https://hooks.example/abc".to_string());
        config.save(&path).await.unwrap();

        let loaded = ManagerConfig::load(&path).await.unwrap();
        assert_eq!(loaded.api_token, "tok-1234567890");
        assert_eq!(
            loaded.webhook_url.as_deref(),
            Some("https://hooks.example/abc")
        );
    }
}

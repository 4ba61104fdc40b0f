//! Configuration management for the selection store
//!
//! Handles loading and validating store configuration. Only the store's
//! own settings live here; the selection value itself is never persisted.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier following reverse-DNS convention
pub const APP_ID: &str = "com.cosmic.SelectionStore";

/// Identifier of the default store
pub const DEFAULT_STORE_ID: &str = "global";

/// Selection held by a freshly created store
pub const DEFAULT_SELECTION: &str = "Overall";

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "store.json";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name the store is registered under
    pub store_id: String,

    /// Value the store starts with and returns to on reset
    pub initial_selection: String,

    /// Log every assignment at debug level
    pub log_changes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_id: DEFAULT_STORE_ID.to_string(),
            initial_selection: DEFAULT_SELECTION.to_string(),
            log_changes: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from the user config directory or return defaults
    pub fn load() -> ConfigResult<Self> {
        let path = Self::config_file_path()?;

        if !path.exists() {
            log::debug!("No store config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: StoreConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        log::info!("Loaded store config from {}", path.display());
        Ok(config)
    }

    /// Check values that would make the store unusable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "store_id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> ConfigResult<PathBuf> {
        Self::config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }
}

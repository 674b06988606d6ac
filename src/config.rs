//! SDK configuration
//!
//! Read from a TOML file (default `stock-pail.toml`) and overridden by the
//! `STOCK_PAIL_URL` and `STOCK_PAIL_API_KEY` environment variables.
//!
//! ```toml
//! [backend]
//! url = "https://project.example.co"
//! api_key = "public-anon-key"
//! stocks_table = "stocks"
//!
//! [storage]
//! stock_file = "./stocks.json"
//! documents_dir = "./documents"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `backend.url`
pub const ENV_URL: &str = "STOCK_PAIL_URL";
/// Environment variable overriding `backend.api_key`
pub const ENV_API_KEY: &str = "STOCK_PAIL_API_KEY";
/// File name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "stock-pail.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("Invalid config: {0}")]
    Parse(String),
    #[error("Failed to write config: {0}")]
    Write(String),
    #[error("Backend URL is not configured (set backend.url or STOCK_PAIL_URL)")]
    MissingUrl,
}

/// Remote backend location and resource names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public key sent as `apikey` and, without a session token, as bearer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub stocks_table: String,
    pub documents_table: String,
    pub documents_bucket: String,
    pub parse_function: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            stocks_table: "stocks".to_string(),
            documents_table: "documents".to_string(),
            documents_bucket: "documents".to_string(),
            parse_function: "parse-document".to_string(),
        }
    }
}

impl BackendConfig {
    /// The configured URL without a trailing slash
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)
    }
}

/// Local storage for offline use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON array of stock records used when no backend is configured
    pub stock_file: PathBuf,
    pub documents_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            stock_file: PathBuf::from("stocks.json"),
            documents_dir: PathBuf::from("documents"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockPailConfig {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
}

impl StockPailConfig {
    /// Parse TOML text; missing sections and keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Write(e.to_string()))
    }

    /// Load a file, or defaults when it does not exist, then apply the environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            Self::from_toml(&text)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment-style overrides from a lookup function
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.is_empty()) {
            self.backend.url = Some(url);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.backend.api_key = Some(key);
        }
    }
}

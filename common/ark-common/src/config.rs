//! Configuration loading for Ark API clients
//!
//! Configuration is loaded from:
//! 1. Environment variables ARK_API_URL, ARK_API_TOKEN, ARK_NAMESPACE
//! 2. The file named by ARK_CONFIG_PATH
//! 3. ~/.ark/config.toml
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ApiError, ApiResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ark API connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Ark API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Ark API (scheme, host and optional path prefix)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent in the Authorization header
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Namespace used when a command does not name one
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout(),
            namespace: default_namespace(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply the environment
    pub fn load() -> ApiResult<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(_) => {
                tracing::debug!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::debug!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> ApiResult<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment-style overrides
    ///
    /// `lookup` resolves a variable name to its value; empty values are
    /// ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("ARK_API_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = lookup("ARK_API_TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(namespace) = lookup("ARK_NAMESPACE") {
            self.api.namespace = namespace;
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ARK_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".ark").join("config.toml"));
        }

        None
    }
}

//! Configuration management for the catalog client.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{Error, Result};

/// Default catalog API address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application identification.
    pub app: AppConfig,

    /// Remote catalog API settings.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Application identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name shown in the console banner.
    pub name: String,

    /// The version of the client.
    pub version: String,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address of the API, without trailing slash.
    pub base_url: String,

    /// Timeout applied to every request.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "catalog-admin".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `CATALOG_`.
    /// For example: `CATALOG_API_BASE_URL`, `CATALOG_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("CATALOG_APP_NAME") {
            config.app.name = name;
        }

        if let Ok(level) = std::env::var("CATALOG_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("CATALOG_API_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                warn!("CATALOG_API_BASE_URL is empty, using {}", DEFAULT_BASE_URL);
            } else {
                config.api.base_url = base_url.to_string();
                info!("Catalog API base URL set to {}", config.api.base_url);
            }
        }

        if let Ok(timeout) = std::env::var("CATALOG_API_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.api.timeout_secs = secs,
                _ => warn!(
                    "Invalid CATALOG_API_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Check the settings that cannot be repaired with a default.
    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                url
            )));
        }
        Ok(())
    }
}

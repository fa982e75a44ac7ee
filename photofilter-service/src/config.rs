//! Where the filter service lives and how long to wait for it.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port the filter service listens on in development.
pub const DEFAULT_PORT: u16 = 4567;

pub const ENV_SERVICE_URL: &str = "PHOTOFILTER_SERVICE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PHOTOFILTER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    format!("http://localhost:{}", DEFAULT_PORT)
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, overridden by `PHOTOFILTER_SERVICE_URL` / `PHOTOFILTER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_SERVICE_URL) {
            config.base_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                value: raw.clone(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base_url}/filtering`.
    pub fn filtering_url(&self) -> Result<Url, ConfigError> {
        let base = self.parsed_base()?;
        base.join("filtering").map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base()?;
        if self.timeout_secs == 0 {
            tracing::error!("service timeout must be at least one second");
            return Err(ConfigError::InvalidTimeout {
                value: self.timeout_secs.to_string(),
            });
        }
        Ok(())
    }

    // Trailing slash so `join` appends instead of replacing the last segment.
    fn parsed_base(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            tracing::error!(url = %self.base_url, "service url must be http or https");
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid timeout '{value}' (expected whole seconds > 0)")]
    InvalidTimeout { value: String },

    #[error("failed to build http client: {0}")]
    Client(String),
}

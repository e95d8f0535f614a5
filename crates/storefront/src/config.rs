//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HUB_API_URL` - Base URL of the Creators Hub backend API
//!   (default: `http://localhost:5000/api`)
//! - `HUB_DATA_DIR` - Directory for durable client-side storage
//!   (default: `.creators-hub`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_DATA_DIR: &str = ".creators-hub";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Base URL of the Hub backend API, without a trailing slash.
    pub api_url: String,
    /// Directory holding durable client-side storage files.
    pub data_dir: PathBuf,
}

impl HubConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `HUB_API_URL` is not a valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("HUB_API_URL", DEFAULT_API_URL);
        let api_url = validate_api_url(&api_url)?;

        let data_dir = PathBuf::from(get_env_or_default("HUB_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self { api_url, data_dir })
    }

    /// Build a configuration directly, for tests and embedders.
    #[must_use]
    pub fn new(api_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self {
            api_url,
            data_dir: data_dir.into(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate the API base URL and strip any trailing slash.
fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("HUB_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "HUB_API_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_url_strips_trailing_slash() {
        let url = validate_api_url("http://localhost:5000/api/").unwrap();
        assert_eq!(url, "http://localhost:5000/api");
    }

    #[test]
    fn test_validate_api_url_rejects_garbage() {
        assert!(validate_api_url("not a url").is_err());
        assert!(validate_api_url("ftp://example.com/api").is_err());
    }

    #[test]
    fn test_new_normalizes_trailing_slash() {
        let config = HubConfig::new("http://127.0.0.1:9000/api/", "/tmp/hub");
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api");
    }
}

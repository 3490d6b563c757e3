//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `INFPRO_API_BASE` - Backend origin serving `/api/*` (default: `http://localhost:3000`)
//! - `INFPRO_STORAGE_PATH` - JSON file backing persistent storage (default: `.infpro/storage.json`)
//! - `INFPRO_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `INFPRO_CACHE_TTL_SECS` - Catalog/review cache lifetime, 0 disables (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_STORAGE_PATH: &str = ".infpro/storage.json";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Location of the file-backed key-value store
    pub storage_path: PathBuf,
}

/// Backend API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin the `/api/*` paths are resolved against
    pub base_url: Url,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// How long successful catalog and review responses are reused
    pub cache_ttl: Duration,
}

impl ApiConfig {
    /// API configuration for `base_url` with default timeout and caching.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("INFPRO_API_BASE", base_url)?,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = parse_base_url("INFPRO_API_BASE", &get("INFPRO_API_BASE", DEFAULT_API_BASE))?;
        let timeout = parse_secs(
            "INFPRO_HTTP_TIMEOUT_SECS",
            &get("INFPRO_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "INFPRO_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let cache_ttl = parse_secs(
            "INFPRO_CACHE_TTL_SECS",
            &get("INFPRO_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
        )?;
        let storage_path = PathBuf::from(get("INFPRO_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingEnvVar("INFPRO_STORAGE_PATH".to_string()));
        }

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout,
                cache_ttl,
            },
            storage_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an absolute http(s) URL.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

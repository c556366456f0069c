//! Runtime configuration
//!
//! Values are layered: built-in defaults, then environment variables, then
//! explicit overrides (the CLI applies its flags last).

use crate::http_client::Environment;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// API key used to authenticate against TMDB
pub const API_KEY_VAR: &str = "TMDB_API_KEY";
/// Overrides the API host
pub const API_HOST_VAR: &str = "TMDB_API_HOST";
/// Request timeout in whole seconds
pub const TIMEOUT_VAR: &str = "MOVIE_CATALOG_TIMEOUT_SECS";
/// Directory for the discover cache
pub const CACHE_DIR_VAR: &str = "MOVIE_CATALOG_CACHE_DIR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value could not be parsed
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Settings needed to compose a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Where resources are resolved
    pub environment: Environment,
    /// Injected as `api_key` query parameter when present
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    /// Explicit cache directory; the platform cache directory is used otherwise
    pub cache_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            environment: Environment::tmdb(),
            api_key: None,
            request_timeout: DEFAULT_TIMEOUT,
            cache_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = var(API_KEY_VAR) {
            config.api_key = Some(api_key);
        }
        if let Some(host) = var(API_HOST_VAR) {
            config.environment = config.environment.with_host(host);
        }
        if let Some(timeout) = var(TIMEOUT_VAR) {
            config.request_timeout = parse_timeout(TIMEOUT_VAR, &timeout)?;
        }
        if let Some(cache_dir) = var(CACHE_DIR_VAR) {
            config.cache_dir = Some(PathBuf::from(cache_dir));
        }

        Ok(config)
    }
}

/// Parses a positive number of seconds
pub fn parse_timeout(name: &str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let seconds: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;

    if seconds == 0 {
        return Err(invalid("timeout must be greater than zero"));
    }

    Ok(Duration::from_secs(seconds))
}

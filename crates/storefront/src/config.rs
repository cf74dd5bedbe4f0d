//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory for persisted cart and user
//!   (default: .phantom-spares; set to an empty string to keep state in memory)
//! - `STOREFRONT_CATALOG_SIZE` - Number of generated products (default: 100)
//! - `STOREFRONT_PAGE_SIZE` - Products per catalog page (default: 12)
//! - `STOREFRONT_CATALOG_SEED` - Seed for a reproducible catalog
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated checkout time (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Default directory for persisted shopper state.
pub const DEFAULT_DATA_DIR: &str = ".phantom-spares";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the cart and user are persisted; `None` keeps them in memory
    pub data_dir: Option<PathBuf>,
    /// Number of products to generate at startup
    pub catalog_size: u32,
    /// Products per catalog page
    pub page_size: usize,
    /// Fixed seed for the product generator
    pub catalog_seed: Option<u64>,
    /// Simulated checkout processing time
    pub checkout_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: Some(PathBuf::from(DEFAULT_DATA_DIR)),
            catalog_size: 100,
            page_size: crate::catalog::view::DEFAULT_PAGE_SIZE,
            catalog_seed: None,
            checkout_delay: crate::services::checkout::DEFAULT_PROCESSING_DELAY,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let page_size: usize = parse_or("STOREFRONT_PAGE_SIZE", &lookup, defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let data_dir = match lookup("STOREFRONT_DATA_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => defaults.data_dir,
        };

        Ok(Self {
            host: parse_or("STOREFRONT_HOST", &lookup, defaults.host)?,
            port: parse_or("STOREFRONT_PORT", &lookup, defaults.port)?,
            data_dir,
            catalog_size: parse_or("STOREFRONT_CATALOG_SIZE", &lookup, defaults.catalog_size)?,
            page_size,
            catalog_seed: parse_optional("STOREFRONT_CATALOG_SEED", &lookup)?,
            checkout_delay: parse_optional("STOREFRONT_CHECKOUT_DELAY_MS", &lookup)?
                .map_or(defaults.checkout_delay, Duration::from_millis),
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Parse an optional variable.
fn parse_optional<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional(lookup, key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Parse a variable with a default value.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(key, lookup)?.unwrap_or(default))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_size, 100);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.checkout_delay, Duration::from_millis(2000));
        assert_eq!(config.data_dir, Some(PathBuf::from(DEFAULT_DATA_DIR)));
        assert!(config.catalog_seed.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_DATA_DIR", "/var/lib/spares"),
            ("STOREFRONT_CATALOG_SIZE", "40"),
            ("STOREFRONT_PAGE_SIZE", "8"),
            ("STOREFRONT_CATALOG_SEED", " 42 "),
            ("STOREFRONT_CHECKOUT_DELAY_MS", "0"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/spares")));
        assert_eq!(config.catalog_size, 40);
        assert_eq!(config.page_size, 8);
        assert_eq!(config.catalog_seed, Some(42));
        assert_eq!(config.checkout_delay, Duration::ZERO);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_empty_data_dir_means_in_memory() {
        let config = load(&[("STOREFRONT_DATA_DIR", "")]).unwrap();
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));

        assert!(load(&[("STOREFRONT_HOST", "localhost:3000")]).is_err());
        assert!(load(&[("STOREFRONT_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("STOREFRONT_CATALOG_SIZE", "-1")]).is_err());
    }

    #[test]
    fn test_blank_sentry_dsn_is_unset() {
        let config = load(&[("SENTRY_DSN", "  ")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}

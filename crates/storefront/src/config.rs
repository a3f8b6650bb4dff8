//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `BOUTIQUE_HOST` - Bind address (default: 127.0.0.1)
//! - `BOUTIQUE_PORT` - Listen port (default: 3000)
//! - `BOUTIQUE_STORAGE` - `file`, `memory` or `none` (default: file)
//! - `BOUTIQUE_DATA_DIR` - Directory for `file` storage (default: data)
//! - `BOUTIQUE_CATALOG_LIST_LATENCY_MS` - Simulated listing delay (default: 500)
//! - `BOUTIQUE_CATALOG_LOOKUP_LATENCY_MS` - Simulated lookup delay (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::storage::StorageBackend;
use crate::stores::CatalogLatency;

/// Default directory for file storage.
pub const DEFAULT_DATA_DIR: &str = "data";

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
    /// Where cart, testimonial and order blobs live
    pub storage: StorageBackend,
    /// Simulated catalog response delays
    pub catalog_latency: CatalogLatency,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            storage: StorageBackend::File(PathBuf::from(DEFAULT_DATA_DIR)),
            catalog_latency: CatalogLatency::default(),
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
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = parse_or(&get, "BOUTIQUE_HOST", defaults.host)?;
        let port = parse_or(&get, "BOUTIQUE_PORT", defaults.port)?;

        let data_dir = get("BOUTIQUE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let storage = match get("BOUTIQUE_STORAGE").as_deref().map(str::trim) {
            None | Some("file") => StorageBackend::File(PathBuf::from(data_dir)),
            Some("memory") => StorageBackend::Memory,
            Some("none") => StorageBackend::Detached,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "BOUTIQUE_STORAGE".to_string(),
                    format!("expected file, memory or none (got {other})"),
                ));
            }
        };

        let catalog_latency = CatalogLatency {
            listing: Duration::from_millis(parse_or(
                &get,
                "BOUTIQUE_CATALOG_LIST_LATENCY_MS",
                millis(defaults.catalog_latency.listing),
            )?),
            lookup: Duration::from_millis(parse_or(
                &get,
                "BOUTIQUE_CATALOG_LOOKUP_LATENCY_MS",
                millis(defaults.catalog_latency.lookup),
            )?),
        };

        Ok(Self {
            host,
            port,
            storage,
            catalog_latency,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
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
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from("data")));
        assert_eq!(config.catalog_latency, CatalogLatency::default());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BOUTIQUE_HOST", "0.0.0.0"),
            ("BOUTIQUE_PORT", "8080"),
            ("BOUTIQUE_DATA_DIR", "/var/lib/boutique"),
            ("BOUTIQUE_CATALOG_LIST_LATENCY_MS", "0"),
            ("BOUTIQUE_CATALOG_LOOKUP_LATENCY_MS", "25"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.storage,
            StorageBackend::File(PathBuf::from("/var/lib/boutique"))
        );
        assert_eq!(config.catalog_latency.listing, Duration::ZERO);
        assert_eq!(config.catalog_latency.lookup, Duration::from_millis(25));
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_storage_kinds() {
        assert_eq!(
            load(&[("BOUTIQUE_STORAGE", "memory")]).unwrap().storage,
            StorageBackend::Memory
        );
        assert_eq!(
            load(&[("BOUTIQUE_STORAGE", "none")]).unwrap().storage,
            StorageBackend::Detached
        );
        assert!(matches!(
            load(&[("BOUTIQUE_STORAGE", "redis")]),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "BOUTIQUE_STORAGE"
        ));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("BOUTIQUE_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid environment variable BOUTIQUE_PORT"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("BOUTIQUE_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }
}

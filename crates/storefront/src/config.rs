//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string; falls back to
//!   `DATABASE_URL`. When set, the cart/wishlist snapshot lives in Postgres.
//! - `STOREFRONT_SNAPSHOT_DIR` - Directory for file-backed snapshots, used when
//!   no database URL is configured
//! - `STOREFRONT_SNAPSHOT_KEY` - Key the snapshot is stored under
//!   (default: threadline-storage)
//! - `STOREFRONT_SEED_PATH` - Seed catalog JSON (default: embedded seed)
//! - `STOREFRONT_FREE_SHIPPING_THRESHOLD` - Subtotal from which shipping is
//!   free (default: 50000)
//! - `STOREFRONT_SHIPPING_FEE` - Flat fee below the threshold (default: 3000)
//! - `STOREFRONT_PAGE_SIZE` - Default listing page size (default: 12)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use threadline_core::snapshot::DEFAULT_SNAPSHOT_KEY;
use threadline_core::store::ShippingPolicy;
use threadline_core::store::query::DEFAULT_PAGE_SIZE;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the cart/wishlist snapshot is kept.
#[derive(Debug, Clone)]
pub enum SnapshotBackend {
    /// `PostgreSQL` `storefront.kv_snapshots` table.
    Postgres { database_url: SecretString },
    /// One JSON file per key in a directory.
    File { dir: PathBuf },
    /// Process memory; lost on restart.
    Memory,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Snapshot storage backend
    pub snapshot_backend: SnapshotBackend,
    /// Key the snapshot is stored under
    pub snapshot_key: String,
    /// Seed catalog file; the embedded seed is used when unset
    pub seed_path: Option<PathBuf>,
    /// Shipping fee table for checkout
    pub shipping: ShippingPolicy,
    /// Page size used when a listing request omits one
    pub page_size: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            snapshot_backend: SnapshotBackend::Memory,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            seed_path: None,
            shipping: ShippingPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
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

        let defaults = Self::default();

        let host = parse_env_or("STOREFRONT_HOST", defaults.host)?;
        let port = parse_env_or("STOREFRONT_PORT", defaults.port)?;

        let snapshot_backend = match get_database_url("STOREFRONT_DATABASE_URL") {
            Some(database_url) => SnapshotBackend::Postgres { database_url },
            None => get_optional_env("STOREFRONT_SNAPSHOT_DIR").map_or(
                SnapshotBackend::Memory,
                |dir| SnapshotBackend::File {
                    dir: PathBuf::from(dir),
                },
            ),
        };
        let snapshot_key = get_env_or_default("STOREFRONT_SNAPSHOT_KEY", DEFAULT_SNAPSHOT_KEY);
        if snapshot_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SNAPSHOT_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let shipping = ShippingPolicy {
            free_threshold: parse_env_or(
                "STOREFRONT_FREE_SHIPPING_THRESHOLD",
                defaults.shipping.free_threshold,
            )?,
            flat_fee: parse_env_or("STOREFRONT_SHIPPING_FEE", defaults.shipping.flat_fee)?,
        };
        if shipping.free_threshold < Decimal::ZERO || shipping.flat_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SHIPPING_FEE".to_string(),
                "shipping amounts must not be negative".to_string(),
            ));
        }

        let page_size: usize = parse_env_or("STOREFRONT_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            snapshot_backend,
            snapshot_key,
            seed_path: get_optional_env("STOREFRONT_SEED_PATH").map(PathBuf::from),
            shipping,
            page_size,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_env_or(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
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

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, using `default` when it is unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

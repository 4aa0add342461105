//! Database operations for storefront `PostgreSQL`.
//!
//! The catalog itself lives in memory; Postgres only holds the persisted
//! cart/wishlist snapshot when a database URL is configured.
//!
//! ## Tables
//!
//! - `storefront.kv_snapshots` - JSON snapshots keyed by namespace
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p threadline-cli -- migrate
//! ```

pub mod snapshots;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

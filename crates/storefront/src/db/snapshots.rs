//! Snapshot rows in `storefront.kv_snapshots`.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// Fetch the JSON stored under `key`, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_snapshot(pool: &PgPool, key: &str) -> Result<Option<JsonValue>, sqlx::Error> {
    sqlx::query_scalar::<_, JsonValue>(
        r"
        SELECT value FROM storefront.kv_snapshots
        WHERE key = $1
        ",
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Insert or replace the JSON stored under `key`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_snapshot(pool: &PgPool, key: &str, value: &JsonValue) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO storefront.kv_snapshots (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

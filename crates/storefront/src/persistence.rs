//! Key-value storage for the cart/wishlist snapshot.
//!
//! The snapshot is a single JSON document stored under a namespace key. Three
//! backends are supported: a Postgres table, a directory of JSON files, and an
//! in-process map used by tests and local runs without storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value as JsonValue;
use sqlx::PgPool;
use thiserror::Error;
use threadline_core::snapshot::{BagSnapshot, SnapshotError};
use tokio::sync::Mutex;

use crate::config::SnapshotBackend;
use crate::db;

/// Error type for snapshot storage.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A key-value backend holding serialized snapshots.
#[derive(Debug, Clone)]
pub enum SnapshotStore {
    Postgres(PgPool),
    File(PathBuf),
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl SnapshotStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Open the backend described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or the snapshot
    /// directory cannot be created.
    pub async fn open(backend: &SnapshotBackend) -> Result<Self, PersistenceError> {
        match backend {
            SnapshotBackend::Postgres { database_url } => {
                let pool = db::create_pool(database_url).await?;
                tracing::info!("Snapshot backend: postgres");
                Ok(Self::Postgres(pool))
            }
            SnapshotBackend::File { dir } => {
                tokio::fs::create_dir_all(dir).await?;
                tracing::info!(dir = %dir.display(), "Snapshot backend: file");
                Ok(Self::File(dir.clone()))
            }
            SnapshotBackend::Memory => {
                tracing::info!("Snapshot backend: memory");
                Ok(Self::memory())
            }
        }
    }

    /// Short backend name for logs and health output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::File(_) => "file",
            Self::Memory(_) => "memory",
        }
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match self {
            Self::Postgres(pool) => Ok(db::snapshots::get_snapshot(pool, key)
                .await?
                .map(|value| value.to_string())),
            Self::File(dir) => match tokio::fs::read_to_string(file_path(dir, key)).await {
                Ok(raw) => Ok(Some(raw)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            Self::Memory(map) => Ok(map.lock().await.get(key).cloned()),
        }
    }

    /// Store `raw` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not JSON (Postgres only) or the
    /// backend cannot be written.
    pub async fn set(&self, key: &str, raw: &str) -> Result<(), PersistenceError> {
        match self {
            Self::Postgres(pool) => {
                let value: JsonValue = serde_json::from_str(raw)?;
                db::snapshots::set_snapshot(pool, key, &value).await?;
            }
            Self::File(dir) => {
                let target = file_path(dir, key);
                let temp = target.with_extension("json.tmp");
                tokio::fs::write(&temp, raw).await?;
                tokio::fs::rename(&temp, &target).await?;
            }
            Self::Memory(map) => {
                map.lock().await.insert(key.to_string(), raw.to_string());
            }
        }
        Ok(())
    }

    /// Load the snapshot stored under `key`.
    ///
    /// Unreadable storage and malformed values both yield an empty snapshot;
    /// the failure is logged.
    pub async fn load_bag(&self, key: &str) -> BagSnapshot {
        match self.get(key).await {
            Ok(raw) => BagSnapshot::decode_or_empty(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, key, "failed to read cart/wishlist snapshot");
                BagSnapshot::default()
            }
        }
    }

    /// Encode and store `snapshot` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub async fn save_bag(&self, key: &str, snapshot: &BagSnapshot) -> Result<(), PersistenceError> {
        let raw = snapshot.encode()?;
        self.set(key, &raw).await
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the directory is gone.
    pub async fn ping(&self) -> Result<(), PersistenceError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            Self::File(dir) => {
                tokio::fs::metadata(dir).await?;
            }
            Self::Memory(_) => {}
        }
        Ok(())
    }
}

/// File holding the value for `key`. Characters outside `[A-Za-z0-9_-]` are
/// replaced so a key can never escape the directory.
fn file_path(dir: &Path, key: &str) -> PathBuf {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{name}.json"))
}

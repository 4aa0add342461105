//! Application state shared across handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use threadline_core::seed::SeedCatalog;
use threadline_core::snapshot::BagSnapshot;
use threadline_core::{CatalogStore, StoreError};
use tokio::sync::Mutex;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::persistence::{PersistenceError, SnapshotStore};
use crate::seed::{SeedError, load_seed};

/// Error building the application state at startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog store sits behind
/// a `std::sync::RwLock`; handlers take the guard inside a closure, so it is
/// never held across an `.await`. A handler that panics while holding the
/// guard poisons the lock; later requests keep using the store, since every
/// store mutation validates before it changes anything.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: RwLock<CatalogStore>,
    snapshots: SnapshotStore,
    /// Sequence number of the newest cart/wishlist state.
    bag_version: AtomicU64,
    /// Sequence number of the newest snapshot written to storage.
    saved_version: Mutex<u64>,
}

impl AppState {
    /// Create a new application state around an existing store.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: CatalogStore, snapshots: SnapshotStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: RwLock::new(store),
                snapshots,
                bag_version: AtomicU64::new(0),
                saved_version: Mutex::new(0),
            }),
        }
    }

    /// Build the state from configuration: load the seed catalog, open the
    /// snapshot backend and restore the persisted cart and wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be loaded or the backend cannot be
    /// opened. A missing or malformed snapshot is not an error.
    pub async fn bootstrap(config: StorefrontConfig) -> Result<Self, BootstrapError> {
        let seed = load_seed(config.seed_path.as_deref()).await?;
        let snapshots = SnapshotStore::open(&config.snapshot_backend).await?;
        Self::from_parts(config, seed, snapshots).await
    }

    /// Assemble the state from an already loaded seed and backend.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::Store` if the configured page size is invalid.
    pub async fn from_parts(
        config: StorefrontConfig,
        seed: SeedCatalog,
        snapshots: SnapshotStore,
    ) -> Result<Self, BootstrapError> {
        let mut store = CatalogStore::from_seed(seed, config.shipping);
        store.set_items_per_page(config.page_size)?;

        let bag = snapshots.load_bag(&config.snapshot_key).await;
        tracing::info!(
            cart_lines = bag.cart.len(),
            wishlist_items = bag.wishlist.len(),
            "Restored cart and wishlist"
        );
        store.hydrate(bag);

        Ok(Self::new(config, store, snapshots))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the snapshot backend.
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.inner.snapshots
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.inner.store.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Catalog store lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, CatalogStore> {
        let guard = self.inner.store.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Catalog store lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });
        self.inner.store.clear_poison();
        guard
    }

    /// Run `f` with shared access to the store.
    pub fn read<T>(&self, f: impl FnOnce(&CatalogStore) -> T) -> T {
        f(&self.read_guard())
    }

    /// Run a store mutation that does not touch the cart or wishlist.
    ///
    /// # Errors
    ///
    /// Returns the mutation's `StoreError`.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&mut CatalogStore) -> Result<T, StoreError>,
    ) -> Result<T, AppError> {
        Ok(f(&mut self.write_guard())?)
    }

    /// Run a cart/wishlist mutation and persist the result in the background.
    ///
    /// The snapshot is captured under the same write guard as the mutation,
    /// so background saves can be ordered; a save is skipped if a newer one
    /// has already been written. Failed mutations are not persisted.
    ///
    /// # Errors
    ///
    /// Returns the mutation's `StoreError`. Storage failures are logged,
    /// never returned.
    pub fn write_bag<T>(
        &self,
        f: impl FnOnce(&mut CatalogStore) -> Result<T, StoreError>,
    ) -> Result<T, AppError> {
        let (value, version, snapshot) = {
            let mut guard = self.write_guard();
            let value = f(&mut guard)?;
            let version = self.inner.bag_version.fetch_add(1, Ordering::SeqCst) + 1;
            (value, version, guard.bag_snapshot())
        };

        let state = self.clone();
        tokio::spawn(async move {
            if let Err(e) = state.save_version(version, &snapshot).await {
                let event_id = sentry::capture_error(&e);
                tracing::error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Failed to persist cart/wishlist snapshot"
                );
            }
        });

        Ok(value)
    }

    /// Write the current cart and wishlist to storage and wait for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub async fn persist_now(&self) -> Result<(), AppError> {
        let (version, snapshot) = {
            let guard = self.read_guard();
            (
                self.inner.bag_version.load(Ordering::SeqCst),
                guard.bag_snapshot(),
            )
        };
        let mut saved = self.inner.saved_version.lock().await;
        if version < *saved {
            return Ok(());
        }
        self.inner
            .snapshots
            .save_bag(&self.inner.config.snapshot_key, &snapshot)
            .await?;
        *saved = version;
        Ok(())
    }

    async fn save_version(
        &self,
        version: u64,
        snapshot: &BagSnapshot,
    ) -> Result<(), PersistenceError> {
        let mut saved = self.inner.saved_version.lock().await;
        if version <= *saved {
            tracing::debug!(version, saved = *saved, "Skipping stale snapshot");
            return Ok(());
        }
        self.inner
            .snapshots
            .save_bag(&self.inner.config.snapshot_key, snapshot)
            .await?;
        *saved = version;
        Ok(())
    }
}

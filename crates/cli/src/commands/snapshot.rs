//! Cart/wishlist snapshot maintenance.
//!
//! Uses the storefront's configuration, so the same environment variables
//! select the backend and key.

use threadline_core::snapshot::BagSnapshot;
use threadline_storefront::StorefrontConfig;
use threadline_storefront::persistence::SnapshotStore;

async fn open() -> Result<(StorefrontConfig, SnapshotStore), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = SnapshotStore::open(&config.snapshot_backend).await?;
    Ok((config, store))
}

/// Print the stored snapshot.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the backend is unreachable.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = open().await?;
    let snapshot = store.load_bag(&config.snapshot_key).await;
    tracing::info!(
        backend = store.kind(),
        key = %config.snapshot_key,
        cart_lines = snapshot.cart.len(),
        wishlist_items = snapshot.wishlist.len(),
        "Loaded snapshot"
    );

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

/// Overwrite the stored snapshot with an empty one.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the write fails.
pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = open().await?;
    store
        .save_bag(&config.snapshot_key, &BagSnapshot::default())
        .await?;
    tracing::info!(backend = store.kind(), key = %config.snapshot_key, "Snapshot cleared");
    Ok(())
}

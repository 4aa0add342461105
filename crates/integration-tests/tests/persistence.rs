//! Integration tests for cart and wishlist survival across restarts.

use std::path::Path;

use reqwest::StatusCode;
use serde_json::json;
use threadline_core::seed::SeedCatalog;
use threadline_integration_tests::TestContext;
use threadline_storefront::StorefrontConfig;
use threadline_storefront::config::SnapshotBackend;
use threadline_storefront::persistence::SnapshotStore;
use threadline_storefront::seed::EMBEDDED_SEED;

async fn start_on(dir: &Path) -> TestContext {
    let backend = SnapshotBackend::File {
        dir: dir.to_path_buf(),
    };
    let config = StorefrontConfig {
        snapshot_backend: backend.clone(),
        ..StorefrontConfig::default()
    };
    let snapshots = SnapshotStore::open(&backend)
        .await
        .expect("Failed to open file snapshot store");
    let seed = SeedCatalog::from_json(EMBEDDED_SEED).expect("embedded seed parses");
    TestContext::start(config, seed, snapshots).await
}

#[tokio::test]
async fn test_bag_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = start_on(dir.path()).await;
    let (status, line) = first
        .post(
            "/cart/items",
            &json!({ "productId": "p-005", "size": "30", "color": "beige", "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{line}");
    first
        .post("/wishlist/items", &json!({ "productId": "p-010" }))
        .await;
    first.state.persist_now().await.expect("persist");

    let second = start_on(dir.path()).await;
    let (_, cart) = second.get("/cart").await;
    assert_eq!(cart["items"][0]["id"], line["id"]);
    assert_eq!(cart["itemCount"], 2);
    let (_, membership) = second.get("/wishlist/products/p-010").await;
    assert_eq!(membership["inWishlist"], true);
}

#[tokio::test]
async fn test_catalog_edits_are_not_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = start_on(dir.path()).await;
    assert_eq!(
        first.delete("/admin/products/p-001").await,
        StatusCode::NO_CONTENT
    );
    first.state.persist_now().await.expect("persist");

    // Products come from the seed on every start
    let second = start_on(dir.path()).await;
    let (status, _) = second.get("/products/p-001").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_snapshot_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    tokio::fs::write(dir.path().join("threadline-storage.json"), "{not json")
        .await
        .expect("write snapshot");

    let ctx = start_on(dir.path()).await;
    let (status, cart) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    let (_, wishlist) = ctx.get("/wishlist").await;
    assert_eq!(wishlist["count"], 0);

    // The store keeps working and overwrites the bad file
    let (status, _) = ctx
        .post("/wishlist/items", &json!({ "productId": "p-002" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    ctx.state.persist_now().await.expect("persist");
    let raw = tokio::fs::read_to_string(dir.path().join("threadline-storage.json"))
        .await
        .expect("read snapshot");
    assert!(raw.contains("p-002"));
}

//! Integration tests for the Threadline storefront API.
//!
//! Each test starts the full router on an ephemeral local port, backed by an
//! in-memory (or temporary file) snapshot store, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p threadline-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `catalog` - Listing filters, sorting, pagination and facets
//! - `bag` - Cart, wishlist and checkout
//! - `admin` - Catalog, order and coupon management
//! - `persistence` - Snapshot survival across restarts

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use threadline_core::seed::SeedCatalog;
use threadline_storefront::persistence::SnapshotStore;
use threadline_storefront::seed::EMBEDDED_SEED;
use threadline_storefront::{AppState, StorefrontConfig};

/// A running storefront and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub addr: SocketAddr,
    pub state: AppState,
}

impl TestContext {
    /// Start a server over the embedded seed catalog.
    pub async fn new() -> Self {
        let seed = SeedCatalog::from_json(EMBEDDED_SEED).expect("embedded seed parses");
        Self::with_seed(seed).await
    }

    /// Start a server over `seed` with an in-memory snapshot store.
    pub async fn with_seed(seed: SeedCatalog) -> Self {
        Self::start(StorefrontConfig::default(), seed, SnapshotStore::memory()).await
    }

    /// Start a server with explicit configuration and snapshot backend.
    pub async fn start(
        config: StorefrontConfig,
        seed: SeedCatalog,
        snapshots: SnapshotStore,
    ) -> Self {
        let state = AppState::from_parts(config, seed, snapshots)
            .await
            .expect("Failed to build application state");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = threadline_storefront::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            client: Client::new(),
            addr,
            state,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        read(resp).await
    }

    pub async fn post(&self, path: &str, body: &impl Serialize) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST failed");
        read(resp).await
    }

    pub async fn put(&self, path: &str, body: &impl Serialize) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT failed");
        read(resp).await
    }

    pub async fn patch(&self, path: &str, body: &impl Serialize) -> (StatusCode, Value) {
        let resp = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PATCH failed");
        read(resp).await
    }

    pub async fn delete(&self, path: &str) -> StatusCode {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE failed")
            .status()
    }
}

/// Status plus body. Non-JSON bodies (plain-text errors) come back as a
/// JSON string.
async fn read(resp: reqwest::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let text = resp.text().await.expect("Failed to read body");
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, body)
}

/// Build a product JSON record for fixture seeds.
#[must_use]
pub fn product_json(id: &str, name: &str, price: u32, sizes: &[&str], minute: u32) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": format!("{name} fixture"),
        "price": price.to_string(),
        "category": "tops",
        "subCategory": "shirts",
        "sizes": sizes,
        "colors": ["black", "white"],
        "stock": 10,
        "rating": 4.0,
        "createdAt": format!("2024-05-01T10:{minute:02}:00Z"),
        "updatedAt": format!("2024-05-01T10:{minute:02}:00Z"),
    })
}

/// A seed holding only the given products.
#[must_use]
pub fn seed_with_products(products: Vec<Value>) -> SeedCatalog {
    serde_json::from_value(serde_json::json!({ "products": products }))
        .expect("fixture products are valid")
}

/// Shipping address and payment fields for checkout bodies.
#[must_use]
pub fn checkout_body(coupon_code: Option<&str>) -> Value {
    serde_json::json!({
        "userId": "u-test",
        "shippingAddress": {
            "name": "Test Shopper",
            "phone": "010-0000-0000",
            "address": "1 Test-ro, Seoul",
            "zipCode": "04000",
        },
        "paymentMethod": "card",
        "couponCode": coupon_code,
    })
}

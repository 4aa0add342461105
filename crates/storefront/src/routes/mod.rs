//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Liveness check
//! GET    /health/ready                   - Snapshot backend reachable
//!
//! # Catalog
//! GET    /products                       - Filtered, sorted, paginated listing
//! GET    /products/facets                - Category names and sub-categories
//! GET    /products/{id}                  - Product detail
//! GET    /categories                     - Active categories
//!
//! # Cart
//! GET    /cart                           - Lines, total and item count
//! POST   /cart/items                     - Add a line
//! PATCH  /cart/items/{id}                - Change quantity or variant
//! DELETE /cart/items/{id}                - Remove a line
//! DELETE /cart                           - Empty the cart
//! POST   /cart/coupon                    - Preview a coupon on the cart
//!
//! # Wishlist
//! GET    /wishlist                       - Entries and count
//! POST   /wishlist/items                 - Add a product
//! DELETE /wishlist/items/{id}            - Remove an entry
//! GET    /wishlist/products/{productId}  - Membership check
//! DELETE /wishlist/products/{productId}  - Remove by product
//! DELETE /wishlist                       - Empty the wishlist
//!
//! # Checkout
//! POST   /checkout                       - Place an order from the cart
//!
//! # Admin
//! GET    /admin/dashboard
//! POST   /admin/products
//! PATCH  /admin/products/{id}
//! DELETE /admin/products/{id}
//! GET    /admin/categories
//! POST   /admin/categories
//! PATCH  /admin/categories/{id}
//! DELETE /admin/categories/{id}
//! PUT    /admin/categories/{id}/active
//! POST   /admin/categories/{id}/sub-categories
//! DELETE /admin/categories/{id}/sub-categories/{subId}
//! GET    /admin/orders?status=
//! GET    /admin/orders/{id}
//! PUT    /admin/orders/{id}/status
//! GET    /admin/coupons
//! POST   /admin/coupons
//! PATCH  /admin/coupons/{id}
//! DELETE /admin/coupons/{id}
//! ```

pub mod admin;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/facets", get(products::facets))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
        .route("/coupon", post(checkout::preview_coupon))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/items", post(wishlist::add))
        .route("/items/{id}", delete(wishlist::remove))
        .route(
            "/products/{product_id}",
            get(wishlist::contains).delete(wishlist::remove_product),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard::show))
        .route("/products", post(admin::products::create))
        .route(
            "/products/{id}",
            patch(admin::products::update).delete(admin::products::delete),
        )
        .route(
            "/categories",
            get(admin::categories::index).post(admin::categories::create),
        )
        .route(
            "/categories/{id}",
            patch(admin::categories::update).delete(admin::categories::delete),
        )
        .route("/categories/{id}/active", put(admin::categories::set_active))
        .route(
            "/categories/{id}/sub-categories",
            post(admin::categories::add_sub_category),
        )
        .route(
            "/categories/{id}/sub-categories/{sub_id}",
            delete(admin::categories::remove_sub_category),
        )
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}", get(admin::orders::show))
        .route("/orders/{id}/status", put(admin::orders::update_status))
        .route(
            "/coupons",
            get(admin::coupons::index).post(admin::coupons::create),
        )
        .route(
            "/coupons/{id}",
            patch(admin::coupons::update).delete(admin::coupons::delete),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/products", product_routes())
        .route("/categories", get(categories::index))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(checkout::place_order))
        .nest("/admin", admin_routes())
}

/// Build the complete application with middleware and state applied.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                        )
                    }),
                )
                .layer(from_fn(request_id_middleware))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the snapshot backend is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.snapshots().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, backend = state.snapshots().kind(), "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

//! Threadline storefront service.
//!
//! Hosts the catalog store behind a JSON HTTP API: product browsing, cart,
//! wishlist and checkout for shoppers, plus an `/admin` surface for catalog,
//! order and coupon management. The cart and wishlist are persisted to a
//! key-value backend after every change.
//!
//! This crate provides the service as a library so it can be tested and
//! embedded; `main.rs` adds Sentry, logging and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod persistence;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::StorefrontConfig;
pub use routes::app;
pub use state::AppState;

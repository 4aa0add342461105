//! Threadline Core - Catalog store and shared types.
//!
//! This crate provides the domain model and the in-memory catalog store used
//! by every Threadline component:
//! - `storefront` - HTTP service exposing the store (public and admin routes)
//! - `cli` - Command-line tools for migrations and catalog queries
//!
//! # Architecture
//!
//! The core crate performs no I/O. The [`CatalogStore`] owns products,
//! orders, categories, coupons, cart lines and wishlist entries, and every
//! read view (filtered listing, pagination, totals) is a pure function of the
//! current state. Durable persistence of the cart and wishlist is left to the
//! caller through the [`snapshot`] codec.
//!
//! # Modules
//!
//! - [`types`] - Entities, newtype IDs, prices and statuses
//! - [`store`] - The catalog store, query pipeline and aggregations
//! - [`snapshot`] - Serialized `{wishlist, cart}` snapshot
//! - [`seed`] - Static seed catalog loading
//! - [`error`] - Store error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod types;

pub use error::{EntityKind, StoreError};
pub use store::CatalogStore;
pub use types::*;

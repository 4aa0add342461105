//! Back-office JSON API.
//!
//! Catalog, order and coupon management. These routes share the storefront's
//! store instance, so changes are visible to shoppers immediately.

pub mod categories;
pub mod coupons;
pub mod dashboard;
pub mod orders;
pub mod products;

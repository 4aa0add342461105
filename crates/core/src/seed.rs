//! Static seed catalog.
//!
//! Products, categories, orders and coupons are not persisted; a service
//! starts from a seed file and keeps changes in memory for its lifetime.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Coupon, Order, Product};

/// Seed data as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl SeedCatalog {
    /// Parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document does not match the seed shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

//! Persisted `{wishlist, cart}` snapshot.
//!
//! Only the cart and wishlist survive restarts; products, categories, orders
//! and coupons are seeded at startup. The snapshot is stored as a JSON string
//! under a fixed key by whichever key-value backend the caller uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CartItem, WishlistItem};

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_SNAPSHOT_KEY: &str = "threadline-storage";

/// Errors encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The persisted part of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagSnapshot {
    #[serde(default)]
    pub wishlist: Vec<WishlistItem>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

impl BagSnapshot {
    /// Serialize to the stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encode` if serialization fails.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    /// Parse the stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Decode` if the value is not a valid snapshot.
    pub fn decode(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(SnapshotError::Decode)
    }

    /// Parse a stored value, falling back to an empty snapshot when there is
    /// nothing stored or the value is malformed.
    #[must_use]
    pub fn decode_or_empty(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self::decode(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding malformed cart/wishlist snapshot");
            Self::default()
        })
    }
}

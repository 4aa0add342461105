//! Error taxonomy for catalog store operations.
//!
//! Lookups never fail; they return `Option`. Mutations that reference an ID
//! return [`StoreError::NotFound`] when the entity is absent, and creates or
//! updates that would leave an entity invalid return
//! [`StoreError::Validation`] without touching state.

use thiserror::Error;

use crate::types::OrderStatus;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Order,
    Category,
    SubCategory,
    CartItem,
    WishlistItem,
    Coupon,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Product => "product",
            Self::Order => "order",
            Self::Category => "category",
            Self::SubCategory => "sub-category",
            Self::CartItem => "cart item",
            Self::WishlistItem => "wishlist item",
            Self::Coupon => "coupon",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`CatalogStore`](crate::CatalogStore) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An order status change is not allowed.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A unique key (slug, coupon code) is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Checkout was attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,
}

impl StoreError {
    /// Build a `NotFound` error for the given entity and ID.
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Build a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Fail with a validation error if `value` is blank.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::not_found(EntityKind::CartItem, "line-1");
        assert_eq!(err.to_string(), "cart item not found: line-1");

        let err = StoreError::InvalidTransition {
            from: OrderStatus::Shipped,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "cannot move order from shipped to cancelled");
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("name", "Linen Shirt").is_ok());
        assert_eq!(
            require_non_blank("name", "   "),
            Err(StoreError::Validation("name must not be empty".to_string()))
        );
    }
}

//! Cart and wishlist lines.
//!
//! Both hold a weak reference to a product plus display fields snapshotted
//! when the line was created, so they keep rendering after the product is
//! edited or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId, WishlistItemId};
use super::price::line_amount;
use crate::error::{Result, StoreError, require_non_blank};

/// A cart line: one product variant at a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    /// Stock level when the line was added. Zero means unknown.
    #[serde(default)]
    pub stock: u32,
}

impl CartItem {
    /// Price times quantity for this line, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        line_amount(self.price, self.quantity)
    }
}

/// Input for adding a cart line with caller-provided snapshot fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    #[serde(default)]
    pub stock: u32,
}

impl NewCartItem {
    pub(crate) fn into_cart_item(self) -> Result<CartItem> {
        require_non_blank("name", &self.name)?;
        if self.price < Decimal::ZERO {
            return Err(StoreError::validation("price must not be negative"));
        }
        check_quantity(self.quantity, self.stock)?;
        Ok(CartItem {
            id: CartItemId::generate(),
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            original_price: self.original_price,
            image: self.image,
            size: self.size,
            color: self.color,
            quantity: self.quantity,
            stock: self.stock,
        })
    }
}

/// Partial update for a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPatch {
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartItemPatch {
    pub(crate) fn apply(self, item: &CartItem) -> Result<CartItem> {
        let mut next = item.clone();
        if let Some(quantity) = self.quantity {
            check_quantity(quantity, next.stock)?;
            next.quantity = quantity;
        }
        if let Some(size) = self.size {
            next.size = size;
        }
        if let Some(color) = self.color {
            next.color = color;
        }
        Ok(next)
    }
}

/// Quantity must be at least one and, when stock is known, within stock.
pub(crate) fn check_quantity(quantity: u32, stock: u32) -> Result<()> {
    if quantity == 0 {
        return Err(StoreError::validation("quantity must be at least 1"));
    }
    if stock > 0 && quantity > stock {
        return Err(StoreError::validation(format!(
            "quantity {quantity} exceeds available stock {stock}"
        )));
    }
    Ok(())
}

/// A wishlist entry. At most one per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Input for adding a wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewWishlistItem {
    pub(crate) fn into_wishlist_item(self, now: DateTime<Utc>) -> Result<WishlistItem> {
        require_non_blank("name", &self.name)?;
        Ok(WishlistItem {
            id: WishlistItemId::generate(),
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            original_price: self.original_price,
            image: self.image,
            added_at: now,
        })
    }
}

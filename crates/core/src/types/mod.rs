//! Core types for Threadline.
//!
//! This module provides the catalog entities and type-safe wrappers for
//! common domain concepts.

pub mod cart;
pub mod category;
pub mod coupon;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

use serde::{Deserialize, Deserializer};

pub use cart::{CartItem, CartItemPatch, NewCartItem, NewWishlistItem, WishlistItem};
pub use category::{Category, CategoryPatch, NewCategory, NewSubCategory, SubCategory};
pub use coupon::{Coupon, CouponPatch, Discount, NewCoupon};
pub use id::*;
pub use order::{Checkout, NewOrder, Order, OrderLine, ShippingAddress};
pub use price::PriceRange;
pub use product::{NewProduct, Product, ProductPatch};
pub use status::OrderStatus;

/// Deserialize a field that distinguishes "absent" from an explicit `null`.
///
/// Pair with `#[serde(default)]`: a missing field stays `None`, `null`
/// becomes `Some(None)`, and a value becomes `Some(Some(value))`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

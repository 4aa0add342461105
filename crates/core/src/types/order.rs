//! Order entities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, UserId};
use super::price::line_amount;
use super::status::OrderStatus;
use crate::error::{Result, StoreError, require_non_blank};

/// A purchased line. The price is captured at order time and never re-read
/// from the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub price: Decimal,
}

impl OrderLine {
    /// Price times quantity for this line, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        line_amount(self.price, self.quantity)
    }
}

/// Shipping address embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub detail_address: String,
    pub zip_code: String,
}

impl ShippingAddress {
    pub(crate) fn validate(&self) -> Result<()> {
        require_non_blank("shippingAddress.name", &self.name)?;
        require_non_blank("shippingAddress.phone", &self.phone)?;
        require_non_blank("shippingAddress.address", &self.address)?;
        require_non_blank("shippingAddress.zipCode", &self.zip_code)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub products: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording an order with explicit lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: UserId,
    pub products: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl NewOrder {
    pub(crate) fn validate(&self) -> Result<()> {
        require_non_blank("userId", self.user_id.as_str())?;
        require_non_blank("paymentMethod", &self.payment_method)?;
        self.shipping_address.validate()?;
        if self.products.is_empty() {
            return Err(StoreError::validation("order must contain at least one line"));
        }
        for line in &self.products {
            if line.quantity == 0 {
                return Err(StoreError::validation("order line quantity must be at least 1"));
            }
            if line.price < Decimal::ZERO {
                return Err(StoreError::validation("order line price must not be negative"));
            }
        }
        Ok(())
    }
}

/// Checkout request: turns the current cart into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub user_id: UserId,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Jiwoo Han".to_string(),
            phone: "010-1234-5678".to_string(),
            address: "12 Seongsu-ro".to_string(),
            detail_address: "3F".to_string(),
            zip_code: "04781".to_string(),
        }
    }

    fn order(lines: Vec<OrderLine>) -> NewOrder {
        NewOrder {
            user_id: UserId::new("u-1"),
            products: lines,
            shipping_address: address(),
            payment_method: "card".to_string(),
            coupon_code: None,
        }
    }

    fn line(quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::new("p-1"),
            quantity,
            size: "M".to_string(),
            color: "black".to_string(),
            price: Decimal::from(45_000),
        }
    }

    #[test]
    fn test_valid_order() {
        assert!(order(vec![line(2)]).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_and_zero_quantity() {
        assert!(order(vec![]).validate().is_err());
        assert!(order(vec![line(0)]).validate().is_err());
    }

    #[test]
    fn test_rejects_missing_address_fields() {
        let mut input = order(vec![line(1)]);
        input.shipping_address.zip_code = String::new();
        assert!(input.validate().is_err());
    }
}

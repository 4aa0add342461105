//! Cart, wishlist and order aggregations.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::checked_sum;
use crate::types::{CartItem, Coupon, Order, OrderLine, OrderStatus, Product, WishlistItem};

/// Stock level at or below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Sum of price times quantity over all cart lines.
///
/// Saturates at `Decimal::MAX`. The store rejects lines that would push the
/// total past it, so this only matters for carts built outside the store.
#[must_use]
pub fn cart_total(cart: &[CartItem]) -> Decimal {
    checked_cart_total(cart).unwrap_or(Decimal::MAX)
}

/// Cart total, or `None` if it does not fit in a `Decimal`.
#[must_use]
pub fn checked_cart_total(cart: &[CartItem]) -> Option<Decimal> {
    checked_sum(cart.iter().map(CartItem::line_total))
}

/// Sum of quantities over all cart lines (not the number of lines).
///
/// Saturates at `u32::MAX`.
#[must_use]
pub fn cart_item_count(cart: &[CartItem]) -> u32 {
    cart.iter()
        .fold(0, |acc: u32, item| acc.saturating_add(item.quantity))
}

/// Number of wishlist entries.
#[must_use]
pub const fn wishlist_count(wishlist: &[WishlistItem]) -> usize {
    wishlist.len()
}

/// Shipping fee table applied to every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotal from which shipping is free.
    pub free_threshold: Decimal,
    /// Fee charged below the threshold.
    pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Decimal::from(50_000),
            flat_fee: Decimal::from(3_000),
        }
    }
}

impl ShippingPolicy {
    /// Shipping fee for an order with `subtotal`.
    #[must_use]
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal <= Decimal::ZERO || subtotal >= self.free_threshold {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }
}

/// The canonical breakdown of an order's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// `subtotal + shipping_fee - discount` for `lines`, or `None` if any
    /// step overflows.
    ///
    /// The coupon, if any, must already have been checked for applicability.
    /// Shipping is charged on the pre-discount subtotal.
    #[must_use]
    pub fn compute(
        lines: &[OrderLine],
        shipping: &ShippingPolicy,
        coupon: Option<&Coupon>,
    ) -> Option<Self> {
        let subtotal = checked_sum(lines.iter().map(OrderLine::line_total))?;
        let shipping_fee = shipping.fee_for(subtotal);
        let discount = coupon.map_or(Decimal::ZERO, |c| c.discount_for(subtotal));
        let total = subtotal
            .checked_add(shipping_fee)?
            .checked_sub(discount)?;
        Some(Self {
            subtotal,
            shipping_fee,
            discount,
            total,
        })
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub product_count: usize,
    pub low_stock_count: usize,
    pub order_count: usize,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    /// Sum of order totals, excluding cancelled orders.
    pub revenue: Decimal,
}

/// Summarize the catalog and order book.
#[must_use]
pub fn dashboard_summary(products: &[Product], orders: &[Order]) -> DashboardSummary {
    let mut orders_by_status: BTreeMap<OrderStatus, usize> =
        OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for order in orders {
        *orders_by_status.entry(order.status).or_default() += 1;
    }
    let revenue = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .fold(Decimal::ZERO, |acc, o| acc.saturating_add(o.total_amount));
    DashboardSummary {
        product_count: products.len(),
        low_stock_count: products
            .iter()
            .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
            .count(),
        order_count: orders.len(),
        orders_by_status,
        revenue,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{CartItemId, Discount, NewCoupon, ProductId};

    fn cart_line(price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::generate(),
            product_id: ProductId::new("p"),
            name: "Line".to_string(),
            price: Decimal::from(price),
            original_price: None,
            image: None,
            size: "M".to_string(),
            color: "black".to_string(),
            quantity,
            stock: 0,
        }
    }

    fn order_line(price: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::new("p"),
            quantity,
            size: "M".to_string(),
            color: "black".to_string(),
            price: Decimal::from(price),
        }
    }

    #[test]
    fn test_cart_totals() {
        let cart = vec![cart_line(10_000, 2), cart_line(5_500, 3)];
        assert_eq!(cart_total(&cart), Decimal::from(36_500));
        assert_eq!(cart_item_count(&cart), 5);
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_cart_totals_saturate_instead_of_panicking() {
        let cart = vec![
            CartItem {
                price: Decimal::MAX,
                ..cart_line(0, 2)
            },
            cart_line(1, u32::MAX),
        ];
        assert_eq!(checked_cart_total(&cart), None);
        assert_eq!(cart_total(&cart), Decimal::MAX);
        assert_eq!(cart_item_count(&cart), u32::MAX);
    }

    #[test]
    fn test_order_totals_out_of_range() {
        let lines = [order_line(1, 1), OrderLine {
            price: Decimal::MAX,
            ..order_line(0, 1)
        }];
        assert_eq!(
            OrderTotals::compute(&lines, &ShippingPolicy::default(), None),
            None
        );
    }

    #[test]
    fn test_shipping_fee_table() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.fee_for(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(policy.fee_for(Decimal::from(49_999)), Decimal::from(3_000));
        assert_eq!(policy.fee_for(Decimal::from(50_000)), Decimal::ZERO);
    }

    #[test]
    fn test_order_totals_with_coupon() {
        let coupon = NewCoupon {
            code: "WELCOME".to_string(),
            name: "Welcome".to_string(),
            discount: Discount::FixedAmount(Decimal::from(5_000)),
            min_order_amount: Decimal::ZERO,
            max_discount: None,
            expires_at: None,
            is_active: true,
        }
        .into_coupon(Utc::now())
        .expect("valid coupon");

        let totals = OrderTotals::compute(
            &[order_line(20_000, 2)],
            &ShippingPolicy::default(),
            Some(&coupon),
        )
        .expect("in range");
        assert_eq!(totals.subtotal, Decimal::from(40_000));
        assert_eq!(totals.shipping_fee, Decimal::from(3_000));
        assert_eq!(totals.discount, Decimal::from(5_000));
        assert_eq!(totals.total, Decimal::from(38_000));
    }

    #[test]
    fn test_order_totals_free_shipping_without_coupon() {
        let totals = OrderTotals::compute(
            &[order_line(30_000, 1), order_line(25_000, 1)],
            &ShippingPolicy::default(),
            None,
        )
        .expect("in range");
        assert_eq!(totals.shipping_fee, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(55_000));
    }
}

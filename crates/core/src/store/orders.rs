//! Order and coupon operations, including checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::CatalogStore;
use super::aggregate::OrderTotals;
use crate::error::{EntityKind, Result, StoreError};
use crate::types::coupon::normalize_code;
use crate::types::price::checked_sum;
use crate::types::{
    Checkout, Coupon, CouponId, CouponPatch, NewCoupon, NewOrder, Order, OrderId, OrderLine,
    OrderStatus, Product,
};

impl CatalogStore {
    // =========================================================================
    // Orders
    // =========================================================================

    #[must_use]
    pub fn get_order_by_id(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders in `status`, or all orders when `status` is `None`, newest first.
    #[must_use]
    pub fn orders_by_status(&self, status: Option<OrderStatus>) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Pair each line of an order with its product, if it still exists.
    #[must_use]
    pub fn order_lines_with_products(
        &self,
        id: &OrderId,
    ) -> Option<Vec<(&OrderLine, Option<&Product>)>> {
        let order = self.get_order_by_id(id)?;
        Some(
            order
                .products
                .iter()
                .map(|line| (line, self.get_product_by_id(&line.product_id)))
                .collect(),
        )
    }

    /// Record an order with explicit lines. Totals are computed from the
    /// lines, the shipping policy and the coupon.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for malformed input or an inapplicable
    /// coupon, and `StoreError::NotFound` for an unknown coupon code.
    pub fn add_order(&mut self, input: NewOrder) -> Result<Order> {
        input.validate()?;
        let now = Utc::now();
        let (totals, coupon_code) =
            self.price_lines(&input.products, input.coupon_code.as_deref(), now)?;
        let order = Order {
            id: OrderId::generate(),
            user_id: input.user_id,
            products: input.products,
            subtotal: totals.subtotal,
            shipping_fee: totals.shipping_fee,
            discount: totals.discount,
            total_amount: totals.total,
            coupon_code,
            shipping_address: input.shipping_address,
            payment_method: input.payment_method.trim().to_string(),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        info!(
            order_id = %order.id,
            total = %order.total_amount,
            lines = order.products.len(),
            "order recorded"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Turn the current cart into a pending order and clear the cart.
    ///
    /// Line prices are the prices snapshotted into the cart, not the current
    /// product prices. The cart is left untouched if checkout fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyCart` when there is nothing to order, plus the
    /// errors of [`add_order`](Self::add_order).
    pub fn place_order(&mut self, checkout: Checkout) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        let products = self
            .cart
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                size: item.size.clone(),
                color: item.color.clone(),
                price: item.price,
            })
            .collect();
        let order = self.add_order(NewOrder {
            user_id: checkout.user_id,
            products,
            shipping_address: checkout.shipping_address,
            payment_method: checkout.payment_method,
            coupon_code: checkout.coupon_code,
        })?;
        self.cart.clear();
        Ok(order)
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown order and
    /// `StoreError::InvalidTransition` if the lifecycle forbids the change.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, id))?;
        if !order.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }
        info!(order_id = %id, from = %order.status, to = %status, "order status changed");
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    fn price_lines(
        &self,
        lines: &[OrderLine],
        coupon_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(OrderTotals, Option<String>)> {
        let out_of_range = || StoreError::validation("order total is out of range");
        let code = coupon_code.map(normalize_code).filter(|c| !c.is_empty());
        let Some(code) = code else {
            let totals =
                OrderTotals::compute(lines, &self.shipping, None).ok_or_else(out_of_range)?;
            return Ok((totals, None));
        };
        let coupon = self
            .get_coupon_by_code(&code)
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, &code))?;
        let subtotal =
            checked_sum(lines.iter().map(OrderLine::line_total)).ok_or_else(out_of_range)?;
        coupon.check_applicable(subtotal, now)?;
        let totals =
            OrderTotals::compute(lines, &self.shipping, Some(coupon)).ok_or_else(out_of_range)?;
        Ok((totals, Some(code)))
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Look up a coupon by code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get_coupon_by_code(&self, code: &str) -> Option<&Coupon> {
        let code = normalize_code(code);
        self.coupons.iter().find(|c| c.code == code)
    }

    #[must_use]
    pub fn get_coupon_by_id(&self, id: &CouponId) -> Option<&Coupon> {
        self.coupons.iter().find(|c| &c.id == id)
    }

    /// Add a coupon.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for malformed input and
    /// `StoreError::Conflict` if the code is taken.
    pub fn add_coupon(&mut self, input: NewCoupon) -> Result<Coupon> {
        let coupon = input.into_coupon(Utc::now())?;
        if self.get_coupon_by_code(&coupon.code).is_some() {
            return Err(StoreError::Conflict(format!(
                "coupon code already in use: {}",
                coupon.code
            )));
        }
        debug!(coupon_id = %coupon.id, code = %coupon.code, "coupon added");
        self.coupons.push(coupon.clone());
        Ok(coupon)
    }

    /// Merge `patch` into the coupon.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Validation`.
    pub fn update_coupon(&mut self, id: &CouponId, patch: CouponPatch) -> Result<Coupon> {
        let slot = self
            .coupons
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, id))?;
        let updated = patch.apply(slot, Utc::now())?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Remove a coupon. Orders keep the code they were placed with.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the coupon does not exist.
    pub fn delete_coupon(&mut self, id: &CouponId) -> Result<Coupon> {
        let index = self
            .coupons
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, id))?;
        Ok(self.coupons.remove(index))
    }

    /// Discount `code` would grant on `subtotal` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown code and
    /// `StoreError::Validation` if the coupon does not apply.
    pub fn apply_coupon(&self, code: &str, subtotal: Decimal, now: DateTime<Utc>) -> Result<Decimal> {
        let coupon = self
            .get_coupon_by_code(code)
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, normalize_code(code)))?;
        coupon.check_applicable(subtotal, now)?;
        Ok(coupon.discount_for(subtotal))
    }
}

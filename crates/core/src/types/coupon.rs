//! Coupon codes managed from the admin console.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CouponId;
use crate::error::{Result, StoreError, require_non_blank};

/// How a coupon reduces the order subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Discount {
    /// Whole-number percentage of the subtotal, 1 to 100.
    Percentage(u8),
    /// Fixed amount off the subtotal.
    FixedAmount(Decimal),
}

/// A coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    /// Upper-case code, unique across coupons.
    pub code: String,
    pub name: String,
    pub discount: Discount,
    #[serde(default)]
    pub min_order_amount: Decimal,
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

/// Normalize a user-entered coupon code for lookup and storage.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl Coupon {
    /// Check that the coupon can be applied to `subtotal` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the coupon is inactive, expired, or
    /// the subtotal is under the minimum order amount.
    pub fn check_applicable(&self, subtotal: Decimal, now: DateTime<Utc>) -> Result<()> {
        if !self.is_active {
            return Err(StoreError::validation(format!(
                "coupon {} is not active",
                self.code
            )));
        }
        if self.expires_at.is_some_and(|expires| expires <= now) {
            return Err(StoreError::validation(format!(
                "coupon {} has expired",
                self.code
            )));
        }
        if subtotal < self.min_order_amount {
            return Err(StoreError::validation(format!(
                "coupon {} requires an order of at least {}",
                self.code, self.min_order_amount
            )));
        }
        Ok(())
    }

    /// Discount this coupon grants on `subtotal`.
    ///
    /// Percentages round down to the currency unit. The result is capped by
    /// `max_discount` and never exceeds the subtotal.
    #[must_use]
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount {
            Discount::Percentage(percent) => {
                let percent = Decimal::from(percent);
                // Dividing first loses precision, so only do it for huge subtotals
                subtotal
                    .checked_mul(percent)
                    .map_or_else(
                        || (subtotal / Decimal::ONE_HUNDRED).saturating_mul(percent),
                        |scaled| scaled / Decimal::ONE_HUNDRED,
                    )
                    .floor()
            }
            Discount::FixedAmount(amount) => amount,
        };
        let capped = self.max_discount.map_or(raw, |cap| raw.min(cap));
        capped.min(subtotal).max(Decimal::ZERO)
    }
}

/// Input for creating a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub name: String,
    pub discount: Discount,
    #[serde(default)]
    pub min_order_amount: Decimal,
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Partial update for a coupon. The code itself is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPatch {
    pub name: Option<String>,
    pub discount: Option<Discount>,
    pub min_order_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub max_discount: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

fn validate_discount(discount: Discount) -> Result<()> {
    match discount {
        Discount::Percentage(percent) if !(1..=100).contains(&percent) => Err(
            StoreError::validation("percentage discount must be between 1 and 100"),
        ),
        Discount::FixedAmount(amount) if amount <= Decimal::ZERO => Err(StoreError::validation(
            "fixed discount must be greater than zero",
        )),
        _ => Ok(()),
    }
}

impl NewCoupon {
    pub(crate) fn into_coupon(self, now: DateTime<Utc>) -> Result<Coupon> {
        require_non_blank("code", &self.code)?;
        require_non_blank("name", &self.name)?;
        validate_discount(self.discount)?;
        Ok(Coupon {
            id: CouponId::generate(),
            code: normalize_code(&self.code),
            name: self.name.trim().to_string(),
            discount: self.discount,
            min_order_amount: self.min_order_amount,
            max_discount: self.max_discount,
            expires_at: self.expires_at,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        })
    }
}

impl CouponPatch {
    pub(crate) fn apply(self, coupon: &Coupon, now: DateTime<Utc>) -> Result<Coupon> {
        let mut next = coupon.clone();
        if let Some(name) = self.name {
            require_non_blank("name", &name)?;
            next.name = name.trim().to_string();
        }
        if let Some(discount) = self.discount {
            validate_discount(discount)?;
            next.discount = discount;
        }
        if let Some(min_order_amount) = self.min_order_amount {
            next.min_order_amount = min_order_amount;
        }
        if let Some(max_discount) = self.max_discount {
            next.max_discount = max_discount;
        }
        if let Some(expires_at) = self.expires_at {
            next.expires_at = expires_at;
        }
        if let Some(is_active) = self.is_active {
            next.is_active = is_active;
        }
        next.updated_at = now;
        Ok(next)
    }
}

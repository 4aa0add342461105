//! Price arithmetic using decimal amounts.
//!
//! Prices are stored as [`Decimal`] amounts in the store's currency unit
//! (the sample catalog is priced in whole won, e.g. `39000`). No currency
//! conversion happens anywhere in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount charged for `quantity` units at `unit_price`, or `None` if it
/// does not fit in a `Decimal`.
#[must_use]
pub fn line_amount(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Sum of `amounts`, or `None` on overflow.
#[must_use]
pub fn checked_sum(amounts: impl IntoIterator<Item = Option<Decimal>>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount?))
}

/// An inclusive price range used by the product filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Create a new range. Bounds are swapped if given in reverse order.
    #[must_use]
    pub fn new(min: Decimal, max: Decimal) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `price` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_amount() {
        assert_eq!(line_amount(Decimal::from(12_500), 3), Some(Decimal::from(37_500)));
        assert_eq!(line_amount(Decimal::from(12_500), 0), Some(Decimal::ZERO));
        assert_eq!(line_amount(Decimal::MAX, 2), None);
    }

    #[test]
    fn test_checked_sum_stops_on_overflow() {
        let amounts = [Some(Decimal::from(1)), Some(Decimal::from(2))];
        assert_eq!(checked_sum(amounts), Some(Decimal::from(3)));
        assert_eq!(checked_sum([Some(Decimal::MAX), Some(Decimal::ONE)]), None);
        assert_eq!(checked_sum([Some(Decimal::ONE), None]), None);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange::new(Decimal::from(20_000), Decimal::from(100_000));
        assert!(range.contains(Decimal::from(20_000)));
        assert!(range.contains(Decimal::from(100_000)));
        assert!(!range.contains(Decimal::from(19_999)));
    }

    #[test]
    fn test_price_range_swaps_reversed_bounds() {
        let range = PriceRange::new(Decimal::from(9), Decimal::from(1));
        assert_eq!(range.min, Decimal::from(1));
        assert_eq!(range.max, Decimal::from(9));
    }
}

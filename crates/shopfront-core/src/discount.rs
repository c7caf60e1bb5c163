//! # Discount Calculation
//!
//! Turns a validated coupon and a subtotal into a discount amount.
//!
//! ## Order of Operations
//! ```text
//! raw discount          PERCENTAGE: subtotal × value / 100 (rounded)
//!      │                FIXED_AMOUNT: value
//!      ▼
//! cap by max_discount   (when the coupon has one)
//!      ▼
//! cap by subtotal       (a total never goes below zero)
//! ```
//!
//! Validation does not call into this module; checkout does, after
//! `validate_coupon` has accepted the code.

use crate::money::Money;
use crate::types::{Coupon, DiscountType};

/// Computes the discount a coupon grants on `subtotal`.
///
/// ## Example
/// ```rust,ignore
/// // 10% off ₹1,000 with a ₹50 cap
/// let off = calculate_discount(&coupon, Money::from(1000));
/// assert_eq!(off, Money::from(50));
/// ```
pub fn calculate_discount(coupon: &Coupon, subtotal: Money) -> Money {
    if subtotal.is_negative() || subtotal.is_zero() {
        return Money::zero();
    }

    let raw = match coupon.discount_type {
        DiscountType::Percentage => subtotal.percentage(coupon.discount_value.amount()),
        DiscountType::FixedAmount => coupon.discount_value,
    };

    let capped = match coupon.max_discount {
        Some(cap) => raw.min(cap),
        None => raw,
    };

    if capped.is_negative() {
        Money::zero()
    } else {
        capped.min(subtotal)
    }
}

/// Returns the subtotal after the coupon's discount.
pub fn apply_discount(coupon: &Coupon, subtotal: Money) -> Money {
    subtotal - calculate_discount(coupon, subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn coupon(discount_type: DiscountType, value: Money, cap: Option<Money>) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: "c1".to_string(),
            code: "TEST".to_string(),
            discount_type,
            discount_value: value,
            min_purchase: None,
            max_discount: cap,
            is_active: true,
            starts_at: now,
            expires_at: now,
            usage_limit: None,
            usage_count: 0,
            created_at: now,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let c = coupon(DiscountType::Percentage, Money::from(10), None);
        assert_eq!(calculate_discount(&c, Money::from(1000)), Money::from(100));
        assert_eq!(
            calculate_discount(&c, Money::from(dec!(99.95))),
            Money::from(dec!(10.00))
        );
    }

    #[test]
    fn test_percentage_discount_respects_cap() {
        let c = coupon(
            DiscountType::Percentage,
            Money::from(10),
            Some(Money::from(50)),
        );
        assert_eq!(calculate_discount(&c, Money::from(1000)), Money::from(50));
        assert_eq!(calculate_discount(&c, Money::from(300)), Money::from(30));
    }

    #[test]
    fn test_fixed_discount_never_exceeds_subtotal() {
        let c = coupon(DiscountType::FixedAmount, Money::from(100), None);
        assert_eq!(calculate_discount(&c, Money::from(500)), Money::from(100));
        assert_eq!(calculate_discount(&c, Money::from(60)), Money::from(60));
        assert_eq!(apply_discount(&c, Money::from(60)), Money::zero());
    }

    #[test]
    fn test_empty_or_negative_subtotal_gets_nothing() {
        let c = coupon(DiscountType::FixedAmount, Money::from(100), None);
        assert_eq!(calculate_discount(&c, Money::zero()), Money::zero());
        assert_eq!(calculate_discount(&c, Money::from(-5)), Money::zero());
    }

    #[test]
    fn test_huge_subtotal_does_not_overflow() {
        let subtotal = Money::new(Decimal::MAX);

        let c = coupon(DiscountType::Percentage, Money::from(10), None);
        let off = calculate_discount(&c, subtotal);
        assert!(off > Money::zero());
        assert!(off < subtotal);
        assert_eq!(apply_discount(&c, subtotal), subtotal - off);

        let capped = coupon(DiscountType::Percentage, Money::from(10), Some(Money::from(500)));
        assert_eq!(calculate_discount(&capped, subtotal), Money::from(500));
    }

    #[test]
    fn test_apply_discount() {
        let c = coupon(DiscountType::Percentage, Money::from(20), None);
        assert_eq!(apply_discount(&c, Money::from(500)), Money::from(400));
    }
}

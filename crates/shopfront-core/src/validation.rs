//! # Validation Module
//!
//! Input validation for coupons created by administrators.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (TypeScript)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: business rule validation                        │
//! │  ├── code characters, percentage ≤ 100, window ordering                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(code)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These checks guard writes. The checkout path uses
//! [`crate::coupon::CouponValidator`] instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountType, NewCoupon};
use crate::MAX_COUPON_CODE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_COUPON_CODE_LEN`] characters
/// - Only letters, digits, hyphens and underscores
///
/// Case is left untouched; how codes compare is the store's
/// [`crate::CodeMatching`] setting.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("SAVE10").is_ok());
/// assert!(validate_coupon_code("").is_err());
/// assert!(validate_coupon_code("SAVE 10").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount value against its type.
///
/// ## Rules
/// - Never negative
/// - Percentages at most 100
pub fn validate_discount_value(discount_type: DiscountType, value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "discount value".to_string(),
        });
    }

    if discount_type == DiscountType::Percentage && value.amount() > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount value".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates an optional amount that must not be negative.
pub fn validate_optional_amount(field: &str, amount: Option<Money>) -> ValidationResult<()> {
    match amount {
        Some(a) if a.is_negative() => Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a usage limit, when present.
pub fn validate_usage_limit(limit: Option<i64>) -> ValidationResult<()> {
    match limit {
        Some(l) if l < 0 => Err(ValidationError::MustNotBeNegative {
            field: "usage limit".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Window Validators
// =============================================================================

/// Validates that a validity window is ordered.
///
/// A window where `starts_at == expires_at` is valid (single instant).
pub fn validate_validity_window(
    starts_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> ValidationResult<()> {
    if starts_at > expires_at {
        return Err(ValidationError::Inconsistent {
            field: "expires_at".to_string(),
            reason: "must not be earlier than starts_at".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validator
// =============================================================================

/// Runs every check for a coupon about to be created.
///
/// Stops at the first failure.
pub fn validate_new_coupon(coupon: &NewCoupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;
    validate_discount_value(coupon.discount_type, coupon.discount_value)?;
    validate_optional_amount("minimum purchase", coupon.min_purchase)?;
    validate_optional_amount("maximum discount", coupon.max_discount)?;
    validate_usage_limit(coupon.usage_limit)?;
    validate_validity_window(coupon.starts_at, coupon.expires_at)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn new_coupon() -> NewCoupon {
        let now = Utc::now();
        NewCoupon {
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Money::from(10),
            min_purchase: None,
            max_discount: None,
            is_active: true,
            starts_at: now,
            expires_at: now + Duration::days(30),
            usage_limit: None,
        }
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SAVE10").is_ok());
        assert!(validate_coupon_code("new-year_2026").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("has space").is_err());
        assert!(validate_coupon_code("ÜBER10").is_err());
        assert!(validate_coupon_code(&"A".repeat(MAX_COUPON_CODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_discount_value() {
        assert!(validate_discount_value(DiscountType::Percentage, Money::from(0)).is_ok());
        assert!(validate_discount_value(DiscountType::Percentage, Money::from(100)).is_ok());
        assert!(
            validate_discount_value(DiscountType::Percentage, Money::from(dec!(100.01))).is_err()
        );
        assert!(validate_discount_value(DiscountType::FixedAmount, Money::from(5000)).is_ok());
        assert!(validate_discount_value(DiscountType::FixedAmount, Money::from(-1)).is_err());
    }

    #[test]
    fn test_validate_validity_window() {
        let now = Utc::now();
        assert!(validate_validity_window(now, now).is_ok());
        assert!(validate_validity_window(now, now + Duration::hours(1)).is_ok());
        assert!(validate_validity_window(now, now - Duration::hours(1)).is_err());
    }

    #[test]
    fn test_validate_new_coupon() {
        assert!(validate_new_coupon(&new_coupon()).is_ok());

        let mut c = new_coupon();
        c.min_purchase = Some(Money::from(-10));
        assert_eq!(
            validate_new_coupon(&c),
            Err(ValidationError::MustNotBeNegative {
                field: "minimum purchase".to_string()
            })
        );

        let mut c = new_coupon();
        c.usage_limit = Some(-1);
        assert!(validate_new_coupon(&c).is_err());
    }
}

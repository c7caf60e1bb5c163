//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At a minimum-purchase boundary:                                        │
//! │    subtotal 500.00 built as 0.1 × 5000 → 499.99999...  → REJECTED      │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    500.00 is exactly 500.00, comparisons are exact                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! // From integers, decimals, or strings - all exact
//! let a = Money::from(1000);
//! let b = Money::from(Decimal::new(100000, 2)); // 1000.00
//! let c: Money = "1000".parse().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//!
//! // Floats are accepted only through a checked constructor
//! assert!(Money::try_from_f64(f64::NAN).is_err());
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of minor-unit digits kept when rounding (paise/cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Symbol used when rendering amounts for customers.
pub const CURRENCY_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major units (rupees), backed by a base-10 decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: minimum-purchase checks compare exactly
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Equality is numeric**: `1000` and `1000.00` are equal
/// - **Serde**: serialized as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from a plain floating point number.
    ///
    /// ## Rules
    /// - NaN and ±infinity are rejected
    /// - Values outside the decimal range are rejected
    ///
    /// The float is converted via its shortest round-trip representation,
    /// so `0.1` becomes exactly `0.1`.
    pub fn try_from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(value))
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "is not representable as a currency amount".to_string(),
            })
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to the currency scale using Bankers Rounding (half to even).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let m: Money = "10.125".parse().unwrap();
    /// assert_eq!(m.round().to_string(), "₹10.12");
    /// ```
    pub fn round(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Computes `percent`% of this amount, rounded to the currency scale.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from(1000);
    /// let off = subtotal.percentage(Decimal::from(15));
    /// assert_eq!(off, Money::from(150));
    /// ```
    ///
    /// Amounts near the decimal range are divided before multiplying; a
    /// result that still does not fit saturates at the range bound.
    pub fn percentage(&self, percent: Decimal) -> Money {
        let exact = self
            .0
            .checked_mul(percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED));
        let scaled = exact.or_else(|| {
            self.0
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|v| v.checked_mul(percent))
        });

        match scaled {
            Some(value) => Money(value).round(),
            None if self.is_negative() != percent.is_sign_negative() => Money(Decimal::MIN),
            None => Money(Decimal::MAX),
        }
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if other < self {
            other
        } else {
            self
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i32> for Money {
    fn from(amount: i32) -> Self {
        Money(Decimal::from(amount))
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Money(Decimal::from(amount))
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Parses a decimal string such as `"499.99"`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: format!("'{s}' is not a decimal number"),
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the amount as currency with two decimal places.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}{}{:.2}", sign, CURRENCY_SYMBOL, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Addition and subtraction saturate at the decimal range bounds.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

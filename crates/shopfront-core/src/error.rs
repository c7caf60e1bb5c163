//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Validation failure OR lookup (storage) failure │
//! │  └── ValidationError  - Input and coupon rule failures                 │
//! │                                                                         │
//! │  shopfront-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP layer (outside this workspace)                                   │
//! │  └── 4xx for CoreError::Validation, 5xx for CoreError::Lookup          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

/// Fixed message shown for any code that is missing, expired or disabled.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid or expired coupon code";

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request cannot be honoured as given; the message is shown as is.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The coupon store could not be read.
    ///
    /// ## When This Occurs
    /// - Database unavailable or pool exhausted
    /// - Stored row could not be decoded
    #[error("Coupon lookup failed: {0}")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Wraps a storage error raised by a [`crate::coupon::CouponLookup`].
    pub fn lookup<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Lookup(Box::new(err))
    }

    /// True when the caller can fix the problem (maps to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Returns the validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            CoreError::Validation(err) => Some(err),
            CoreError::Lookup(_) => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements. The two
/// coupon variants are the only failures `validate_coupon` produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Code not found among active coupons (missing, expired, inactive).
    #[error("Invalid or expired coupon code")]
    InvalidCoupon,

    /// Order subtotal below the coupon's minimum purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout: subtotal ₹300.00, code SAVE20 (min ₹500.00)
    ///      │
    ///      ▼
    /// MinimumPurchaseNotMet { minimum: ₹500.00 }
    ///      │
    ///      ▼
    /// UI shows: "Minimum purchase of ₹500.00 required"
    /// ```
    #[error("Minimum purchase of {minimum} required")]
    MinimumPurchaseNotMet { minimum: Money },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-decimal amount, bad characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields are inconsistent with each other.
    #[error("{field} {reason}")]
    Inconsistent { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_error_messages() {
        assert_eq!(
            ValidationError::InvalidCoupon.to_string(),
            INVALID_COUPON_MESSAGE
        );

        let err = ValidationError::MinimumPurchaseNotMet {
            minimum: Money::from(500),
        };
        assert_eq!(err.to_string(), "Minimum purchase of ₹500.00 required");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        };
        assert_eq!(err.to_string(), "code must be at most 32 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidCoupon.into();
        assert!(core_err.is_client_error());
        assert_eq!(core_err.to_string(), INVALID_COUPON_MESSAGE);
        assert_eq!(
            core_err.as_validation(),
            Some(&ValidationError::InvalidCoupon)
        );
    }

    #[test]
    fn test_lookup_error_is_server_side() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let core_err = CoreError::lookup(io);
        assert!(!core_err.is_client_error());
        assert!(core_err.as_validation().is_none());
        assert_eq!(core_err.to_string(), "Coupon lookup failed: disk gone");
    }
}

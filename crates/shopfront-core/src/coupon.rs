//! # Coupon Validation
//!
//! Decides whether a coupon code may be applied to an order subtotal.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_coupon("SAVE20", Some(₹300.00))                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CouponLookup::find_active_by_code("SAVE20")                           │
//! │       │                                                                 │
//! │       ├── None ──────────────────► InvalidCoupon                       │
//! │       │   (missing / expired / disabled / not started: all the same)   │
//! │       ▼                                                                 │
//! │  min_purchase set AND subtotal given?                                  │
//! │       │                                                                 │
//! │       ├── no ────────────────────► Ok(coupon)                          │
//! │       ▼                                                                 │
//! │  subtotal < min_purchase ? (decimal comparison)                        │
//! │       │                                                                 │
//! │       ├── yes ───────────────────► MinimumPurchaseNotMet { ₹500.00 }   │
//! │       ▼                                                                 │
//! │  Ok(coupon)  (unchanged, no counters touched)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validator never decides activity itself: the lookup applies
//! `is_active AND starts_at <= now <= expires_at`.

use std::future::Future;

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pagination::PageRequest;
use crate::types::{Coupon, CouponPage};

// =============================================================================
// Lookup Contract
// =============================================================================

/// Read access to currently-active coupons.
///
/// Implemented by `shopfront_db::CouponRepository`. Both methods see only
/// coupons that are active *now*.
pub trait CouponLookup {
    /// Storage failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the active coupon matching `code`, or `None`.
    ///
    /// A missing code is `Ok(None)`, never an error.
    fn find_active_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Coupon>, Self::Error>> + Send;

    /// Returns active coupons newest-first, skipping `skip` and returning at
    /// most `take`, together with the total active count.
    fn list_active(
        &self,
        skip: i64,
        take: i64,
    ) -> impl Future<Output = Result<CouponPage, Self::Error>> + Send;
}

// =============================================================================
// Pure Rule
// =============================================================================

/// Checks a coupon's minimum purchase against an optional subtotal.
///
/// ## Rules
/// - No minimum → passes
/// - No subtotal → passes (not yet evaluable)
/// - `subtotal < minimum` → [`ValidationError::MinimumPurchaseNotMet`]
pub fn check_minimum_purchase(
    coupon: &Coupon,
    subtotal: Option<Money>,
) -> Result<(), ValidationError> {
    match (coupon.min_purchase, subtotal) {
        (Some(minimum), Some(subtotal)) if subtotal < minimum => {
            Err(ValidationError::MinimumPurchaseNotMet { minimum })
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Validates coupon codes and lists active coupons.
///
/// Stateless between calls; holds only the lookup handle.
///
/// ## Usage
/// ```rust,ignore
/// let validator = CouponValidator::new(db.coupons());
///
/// let coupon = validator.validate_coupon("SAVE10", None).await?;
/// let coupon = validator.validate_coupon("SAVE20", Some(Money::from(1000))).await?;
/// let page = validator.list_active(1, 10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CouponValidator<L> {
    lookup: L,
}

impl<L: CouponLookup> CouponValidator<L> {
    /// Creates a validator over the given lookup.
    pub fn new(lookup: L) -> Self {
        CouponValidator { lookup }
    }

    /// Returns the underlying lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Validates `code` for an order with an optional subtotal.
    ///
    /// ## Returns
    /// * `Ok(Coupon)` - the stored coupon, unchanged
    /// * `Err(CoreError::Validation(InvalidCoupon))` - no active coupon has this code
    /// * `Err(CoreError::Validation(MinimumPurchaseNotMet))` - subtotal too low
    /// * `Err(CoreError::Lookup(_))` - the store failed
    pub async fn validate_coupon(
        &self,
        code: &str,
        order_subtotal: Option<Money>,
    ) -> CoreResult<Coupon> {
        let coupon = self
            .lookup
            .find_active_by_code(code)
            .await
            .map_err(CoreError::lookup)?
            .ok_or_else(|| {
                debug!(code = %code, "Coupon rejected: no active coupon with this code");
                ValidationError::InvalidCoupon
            })?;

        if let Err(err) = check_minimum_purchase(&coupon, order_subtotal) {
            debug!(
                code = %code,
                minimum = ?coupon.min_purchase,
                subtotal = ?order_subtotal,
                "Coupon rejected: minimum purchase not met"
            );
            return Err(err.into());
        }

        debug!(code = %code, coupon_id = %coupon.id, "Coupon accepted");
        Ok(coupon)
    }

    /// Lists active coupons for a 1-based page.
    ///
    /// Page and limit are clamped through [`PageRequest`], so the offset
    /// passed to the lookup is `(page - 1) * limit` and never negative.
    pub async fn list_active(&self, page: i64, limit: i64) -> CoreResult<CouponPage> {
        let request = PageRequest::new(page, limit);
        self.list_active_page(request).await
    }

    /// Lists active coupons for an already-built [`PageRequest`].
    pub async fn list_active_page(&self, request: PageRequest) -> CoreResult<CouponPage> {
        debug!(
            page = request.page(),
            limit = request.limit(),
            "Listing active coupons"
        );

        self.lookup
            .list_active(request.offset(), request.limit())
            .await
            .map_err(CoreError::lookup)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

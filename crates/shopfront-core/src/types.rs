//! # Domain Types
//!
//! Core domain types used throughout Shopfront's coupon handling.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │       Coupon        │   │  DiscountType   │   │   CouponPage    │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)          │   │  Percentage     │   │  coupons        │   │
//! │  │  code (business)    │   │  FixedAmount    │   │  total          │   │
//! │  │  discount_value     │   └─────────────────┘   └─────────────────┘   │
//! │  │  min_purchase?      │                                               │
//! │  │  starts_at          │   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │  expires_at         │   │  CodeMatching   │   │   NewCoupon     │   │
//! │  │  is_active          │   │  ─────────────  │   │  (admin input)  │   │
//! │  └─────────────────────┘   │  Exact          │   └─────────────────┘   │
//! │                            │  CaseInsensitive│                          │
//! │                            └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `id`: UUID v4, immutable storage identity
//! - `code`: what the customer types at checkout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Discount Type
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal (0-100).
    Percentage,
    /// `discount_value` is a currency amount.
    FixedAmount,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "PERCENTAGE"),
            DiscountType::FixedAmount => write!(f, "FIXED_AMOUNT"),
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount code with a validity window and discount parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer-entered code, unique across coupons.
    pub code: String,

    pub discount_type: DiscountType,

    /// Percentage (0-100) or currency amount, per `discount_type`.
    #[ts(type = "string")]
    pub discount_value: Money,

    /// Subtotal must reach this for the coupon to apply.
    #[ts(type = "string | null")]
    pub min_purchase: Option<Money>,

    /// Cap on the computed discount. Not checked by the validator.
    #[ts(type = "string | null")]
    pub max_discount: Option<Money>,

    /// Administrative on/off switch.
    pub is_active: bool,

    #[ts(as = "String")]
    pub starts_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,

    /// Maximum redemptions. Not checked by the validator.
    pub usage_limit: Option<i64>,

    /// Redemptions so far.
    pub usage_count: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Checks the activity invariant against a given instant.
    ///
    /// Active means `is_active && starts_at <= now <= expires_at`. The
    /// repository applies the same predicate in SQL; this helper exists for
    /// callers already holding a record.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.starts_at <= now && now <= self.expires_at
    }

    /// Human-readable discount: `10%` or `₹100.00`.
    pub fn discount_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => {
                format!("{}%", self.discount_value.amount().normalize())
            }
            DiscountType::FixedAmount => self.discount_value.to_string(),
        }
    }
}

// =============================================================================
// New Coupon (admin input)
// =============================================================================

/// Fields an administrator supplies when creating a coupon.
///
/// `id`, `usage_count` and `created_at` are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Money,
    #[serde(default)]
    pub min_purchase: Option<Money>,
    #[serde(default)]
    pub max_discount: Option<Money>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub usage_limit: Option<i64>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Coupon Page
// =============================================================================

/// One page of active coupons plus the total active count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponPage {
    pub coupons: Vec<Coupon>,
    pub total: i64,
}

// =============================================================================
// Code Matching
// =============================================================================

/// How the store compares a submitted code with stored codes.
///
/// No trimming or case folding happens before lookup; this setting only
/// selects the comparison the store performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeMatching {
    /// Byte-for-byte comparison: `save10` does not match `SAVE10`.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison.
    CaseInsensitive,
}

impl FromStr for CodeMatching {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(CodeMatching::Exact),
            "case_insensitive" | "case-insensitive" => Ok(CodeMatching::CaseInsensitive),
            other => Err(ValidationError::InvalidFormat {
                field: "code matching".to_string(),
                reason: format!("'{other}' is not one of: exact, case_insensitive"),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

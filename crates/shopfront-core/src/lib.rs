//! # shopfront-core: Pure Business Logic for Shopfront Coupons
//!
//! This crate holds the coupon rules of the storefront checkout as pure
//! functions and types, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (React)                           │   │
//! │  │    Cart ──► Apply coupon ──► Checkout ──► Payment              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  coupon   │  │ validation│  │   │
//! │  │   │  Coupon   │  │   Money   │  │ Validator │  │   rules   │  │   │
//! │  │   │ CouponPage│  │ (Decimal) │  │  Lookup   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ CouponLookup                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shopfront-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Coupon, DiscountType, CouponPage)
//! - [`money`] - Decimal money (no floating point!)
//! - [`coupon`] - `CouponLookup` contract and `CouponValidator`
//! - [`discount`] - Discount amount calculation
//! - [`pagination`] - Clamped page requests
//! - [`validation`] - Admin input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let subtotal = Money::from(300);
//! let minimum: Money = "500".parse().unwrap();
//! assert!(subtotal < minimum);
//! assert_eq!(minimum.to_string(), "₹500.00");
//! assert_eq!(subtotal.percentage(Decimal::from(10)), Money::from(30));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod discount;
pub mod error;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::{CouponLookup, CouponValidator};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pagination::PageRequest;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a listing request gives none.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a listing returns.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Longest coupon code accepted on creation.
pub const MAX_COUPON_CODE_LEN: usize = 32;

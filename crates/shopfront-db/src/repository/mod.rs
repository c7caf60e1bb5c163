//! # Repository Module
//!
//! Database repository implementations for Shopfront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Checkout handler                                                      │
//! │       │                                                                 │
//! │       │  CouponValidator::validate_coupon("SAVE10", subtotal)          │
//! │       ▼                                                                 │
//! │  CouponLookup (trait, shopfront-core)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CouponRepository                                                      │
//! │  ├── find_active_by_code(&self, code)                                  │
//! │  ├── list_active(&self, skip, take)                                    │
//! │  ├── count_active(&self)                                               │
//! │  └── insert(&self, new_coupon)                                         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CouponRepository`](coupon::CouponRepository) - Coupon lookup, listing and creation

pub mod coupon;

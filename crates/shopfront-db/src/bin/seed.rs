//! # Seed Data Generator
//!
//! Populates the database with sample coupons for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./shopfront.db
//! cargo run -p shopfront-db --bin seed
//!
//! # Seed another database, matching codes case-insensitively
//! SHOPFRONT_DB_PATH=./data/dev.db SHOPFRONT_COUPON_CODE_MATCHING=case_insensitive \
//!     cargo run -p shopfront-db --bin seed
//! ```
//!
//! ## Generated Coupons
//! | Code        | Discount        | Minimum   | State            |
//! |-------------|-----------------|-----------|------------------|
//! | `SAVE10`    | 10%             | none      | active           |
//! | `SAVE20`    | 20% (max ₹300)  | ₹500.00   | active           |
//! | `FLAT100`   | ₹100.00         | ₹999.00   | active           |
//! | `SUMMER5`   | 5%              | none      | expired          |
//! | `STAFF50`   | 50%             | none      | disabled         |

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shopfront_core::{DiscountType, Money, NewCoupon};
use shopfront_db::{Database, DbConfig, DbError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn sample_coupons() -> Vec<NewCoupon> {
    let now = Utc::now();
    let coupon = |code: &str, discount_type, value: i64| NewCoupon {
        code: code.to_string(),
        discount_type,
        discount_value: Money::from(value),
        min_purchase: None,
        max_discount: None,
        is_active: true,
        starts_at: now - Duration::days(1),
        expires_at: now + Duration::days(90),
        usage_limit: None,
    };

    vec![
        coupon("SAVE10", DiscountType::Percentage, 10),
        NewCoupon {
            min_purchase: Some(Money::new(Decimal::new(50000, 2))),
            max_discount: Some(Money::from(300)),
            usage_limit: Some(1000),
            ..coupon("SAVE20", DiscountType::Percentage, 20)
        },
        NewCoupon {
            min_purchase: Some(Money::new(Decimal::new(99900, 2))),
            ..coupon("FLAT100", DiscountType::FixedAmount, 100)
        },
        NewCoupon {
            starts_at: now - Duration::days(120),
            expires_at: now - Duration::days(30),
            ..coupon("SUMMER5", DiscountType::Percentage, 5)
        },
        NewCoupon {
            is_active: false,
            ..coupon("STAFF50", DiscountType::Percentage, 50)
        },
    ]
}

/// Initializes the tracing subscriber.
///
/// Default filter: `info,shopfront_db=debug,sqlx=warn`. Override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = DbConfig::from_env()?;
    info!(path = %config.database_path.display(), "Seeding coupons");

    let db = Database::new(config).await?;
    let coupons = db.coupons();

    let mut inserted = 0;
    for new_coupon in sample_coupons() {
        let code = new_coupon.code.clone();
        match coupons.insert(new_coupon).await {
            Ok(coupon) => {
                inserted += 1;
                info!(
                    code = %coupon.code,
                    discount_type = %coupon.discount_type,
                    discount = %coupon.discount_label(),
                    active_now = coupon.is_active_at(Utc::now()),
                    "Inserted coupon"
                );
            }
            Err(DbError::UniqueViolation { .. }) => {
                warn!(code = %code, "Coupon already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let active = coupons.count_active().await?;
    info!(inserted, active, "Seed complete");

    db.close().await;
    Ok(())
}

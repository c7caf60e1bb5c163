//! End-to-end coupon validation against an in-memory SQLite database.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use shopfront_core::{
    CodeMatching, CoreError, CouponValidator, DiscountType, Money, NewCoupon, ValidationError,
};
use shopfront_db::{CouponRepository, Database, DbConfig};

async fn setup(config: DbConfig) -> (Database, CouponValidator<CouponRepository>) {
    let db = Database::new(config).await.unwrap();
    let repo = db.coupons();

    let now = Utc::now();
    let base = NewCoupon {
        code: String::new(),
        discount_type: DiscountType::Percentage,
        discount_value: Money::from(10),
        min_purchase: None,
        max_discount: None,
        is_active: true,
        starts_at: now - Duration::days(1),
        expires_at: now + Duration::days(30),
        usage_limit: None,
    };

    repo.insert(NewCoupon {
        code: "SAVE10".into(),
        ..base.clone()
    })
    .await
    .unwrap();

    repo.insert(NewCoupon {
        code: "SAVE20".into(),
        discount_value: Money::from(20),
        min_purchase: Some(Money::new(dec!(500))),
        ..base.clone()
    })
    .await
    .unwrap();

    repo.insert(NewCoupon {
        code: "EXPIRED".into(),
        starts_at: now - Duration::days(60),
        expires_at: now - Duration::days(1),
        ..base.clone()
    })
    .await
    .unwrap();

    repo.insert(NewCoupon {
        code: "DISABLED".into(),
        is_active: false,
        ..base
    })
    .await
    .unwrap();

    (db, CouponValidator::new(repo))
}

#[tokio::test]
async fn scenario_a_percentage_coupon_without_minimum() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    let coupon = validator.validate_coupon("SAVE10", None).await.unwrap();
    assert_eq!(coupon.code, "SAVE10");
    assert_eq!(coupon.discount_type, DiscountType::Percentage);
    assert_eq!(coupon.discount_value, Money::new(dec!(10)));
    assert_eq!(coupon.usage_count, 0);
}

#[tokio::test]
async fn scenario_b_subtotal_below_minimum() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    let err = validator
        .validate_coupon("SAVE20", Some(Money::from(300)))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(err.to_string().contains("Minimum purchase"));
    assert_eq!(err.to_string(), "Minimum purchase of ₹500.00 required");
}

#[tokio::test]
async fn scenario_c_subtotal_meets_minimum() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    let coupon = validator
        .validate_coupon("SAVE20", Some(Money::from(1000)))
        .await
        .unwrap();
    assert_eq!(coupon.code, "SAVE20");

    // Exactly the minimum passes too
    assert!(validator
        .validate_coupon("SAVE20", Some(Money::new(dec!(500.00))))
        .await
        .is_ok());

    // Minimum is skipped when no subtotal is known yet
    assert!(validator.validate_coupon("SAVE20", None).await.is_ok());
}

#[tokio::test]
async fn scenario_d_unknown_code() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    for code in ["INVALID", "EXPIRED", "DISABLED", ""] {
        let err = validator
            .validate_coupon(code, Some(Money::from(1000)))
            .await
            .unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(ValidationError::InvalidCoupon)),
            "{code}: {err:?}"
        );
        assert_eq!(err.to_string(), "Invalid or expired coupon code");
    }
}

#[tokio::test]
async fn scenario_e_list_active() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    let page = validator.list_active(1, 10).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.coupons.len(), 2);

    let codes: Vec<_> = page.coupons.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["SAVE20", "SAVE10"]);

    let second = validator.list_active(2, 1).await.unwrap();
    assert_eq!(second.total, 2);
    assert_eq!(second.coupons.len(), 1);
    assert_eq!(second.coupons[0].code, "SAVE10");

    let past_end = validator.list_active(3, 10).await.unwrap();
    assert!(past_end.coupons.is_empty());
    assert_eq!(past_end.total, 2);
}

#[tokio::test]
async fn case_sensitivity_follows_configuration() {
    let (_db, exact) = setup(DbConfig::in_memory()).await;
    assert!(exact.validate_coupon("save10", None).await.is_err());

    let config = DbConfig::in_memory().code_matching(CodeMatching::CaseInsensitive);
    let (_db, relaxed) = setup(config).await;
    let coupon = relaxed.validate_coupon("save10", None).await.unwrap();
    assert_eq!(coupon.code, "SAVE10");
}

#[tokio::test]
async fn subtotal_representation_does_not_change_outcome() {
    let (_db, validator) = setup(DbConfig::in_memory()).await;

    let subtotals = [
        Money::from(300),
        Money::new(dec!(300.00)),
        "300".parse::<Money>().unwrap(),
        Money::try_from_f64(300.0).unwrap(),
    ];
    for subtotal in subtotals {
        assert!(validator
            .validate_coupon("SAVE20", Some(subtotal))
            .await
            .is_err());
    }
}

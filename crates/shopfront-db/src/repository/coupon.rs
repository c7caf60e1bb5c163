//! # Coupon Repository
//!
//! Database operations for coupons.
//!
//! ## Key Operations
//! - Active lookup by code (exact or case-insensitive)
//! - Newest-first listing of active coupons with a total count
//! - Insert with input validation
//!
//! ## Activity Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What "active" means in SQL                          │
//! │                                                                         │
//! │  is_active = 1                                                         │
//! │  AND starts_at  <= :now      (epoch millis)                            │
//! │  AND expires_at >= :now      (epoch millis)                            │
//! │                                                                         │
//! │  ┌──────────┬───────────┬────────────┬────────────┬──────────┐         │
//! │  │ code     │ is_active │ starts_at  │ expires_at │ visible? │         │
//! │  ├──────────┼───────────┼────────────┼────────────┼──────────┤         │
//! │  │ SAVE10   │ 1         │ yesterday  │ next week  │ yes      │         │
//! │  │ OLD5     │ 1         │ last month │ yesterday  │ no       │         │
//! │  │ OFF20    │ 0         │ yesterday  │ next week  │ no       │         │
//! │  │ SOON15   │ 1         │ tomorrow   │ next month │ no       │         │
//! │  └──────────┴───────────┴────────────┴────────────┴──────────┘         │
//! │                                                                         │
//! │  Lookup, listing and counting all share this predicate.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use shopfront_core::validation::validate_new_coupon;
use shopfront_core::{
    CodeMatching, Coupon, CouponLookup, CouponPage, DiscountType, Money, NewCoupon,
};

use crate::error::{DbError, DbResult};

const COUPON_COLUMNS: &str = "id, code, discount_type, discount_value, min_purchase, \
     max_discount, is_active, starts_at, expires_at, usage_limit, usage_count, created_at";

const ACTIVE_FILTER: &str = "is_active = 1 AND starts_at <= ? AND expires_at >= ?";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `coupons` row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: String,
    code: String,
    discount_type: DiscountType,
    discount_value: String,
    min_purchase: Option<String>,
    max_discount: Option<String>,
    is_active: bool,
    starts_at: i64,
    expires_at: i64,
    usage_limit: Option<i64>,
    usage_count: i64,
    created_at: i64,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = DbError;

    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        Ok(Coupon {
            discount_value: parse_money("discount_value", &row.discount_value)?,
            min_purchase: parse_optional_money("min_purchase", row.min_purchase.as_deref())?,
            max_discount: parse_optional_money("max_discount", row.max_discount.as_deref())?,
            starts_at: from_millis("starts_at", row.starts_at)?,
            expires_at: from_millis("expires_at", row.expires_at)?,
            created_at: from_millis("created_at", row.created_at)?,
            id: row.id,
            code: row.code,
            discount_type: row.discount_type,
            is_active: row.is_active,
            usage_limit: row.usage_limit,
            usage_count: row.usage_count,
        })
    }
}

fn parse_money(column: &str, raw: &str) -> DbResult<Money> {
    raw.trim()
        .parse::<Decimal>()
        .map(Money::new)
        .map_err(|e| DbError::invalid_data(column, format!("'{}': {}", raw, e)))
}

fn parse_optional_money(column: &str, raw: Option<&str>) -> DbResult<Option<Money>> {
    raw.map(|value| parse_money(column, value)).transpose()
}

fn from_millis(column: &str, millis: i64) -> DbResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        DbError::invalid_data(column, format!("timestamp out of range: {}", millis))
    })
}

fn money_text(money: Money) -> String {
    money.amount().normalize().to_string()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for coupon database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CouponRepository::new(pool);
///
/// // Checkout lookup
/// let coupon = repo.find_active_by_code("SAVE10").await?;
///
/// // Storefront listing, second page of ten
/// let page = repo.list_active(10, 10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
    code_matching: CodeMatching,
}

impl CouponRepository {
    /// Creates a new CouponRepository with exact code matching.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository {
            pool,
            code_matching: CodeMatching::default(),
        }
    }

    /// Sets how submitted codes are compared with stored codes.
    pub fn with_code_matching(mut self, code_matching: CodeMatching) -> Self {
        self.code_matching = code_matching;
        self
    }

    /// Returns the configured code matching.
    pub fn code_matching(&self) -> CodeMatching {
        self.code_matching
    }

    fn code_clause(&self) -> &'static str {
        match self.code_matching {
            CodeMatching::Exact => "code = ?",
            CodeMatching::CaseInsensitive => "code = ? COLLATE NOCASE",
        }
    }

    /// Finds the coupon with this code that is active right now.
    pub async fn find_active_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        self.find_active_by_code_at(code, Utc::now()).await
    }

    /// Finds the coupon with this code that is active at `now`.
    ///
    /// The code is passed to SQLite as given. Under case-insensitive matching
    /// two stored codes may differ only by case; the newest one wins.
    pub async fn find_active_by_code_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<Coupon>> {
        let now_ms = now.timestamp_millis();

        debug!(code = %code, matching = ?self.code_matching, "Looking up active coupon");

        let sql = format!(
            "SELECT {} FROM coupons WHERE {} AND {} \
             ORDER BY created_at DESC, rowid DESC LIMIT 1",
            COUPON_COLUMNS,
            self.code_clause(),
            ACTIVE_FILTER
        );

        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(code)
            .bind(now_ms)
            .bind(now_ms)
            .fetch_optional(&self.pool)
            .await?;

        let coupon = row.map(Coupon::try_from).transpose()?;
        debug!(code = %code, found = coupon.is_some(), "Coupon lookup finished");
        Ok(coupon)
    }

    /// Lists active coupons newest-first with the total active count.
    pub async fn list_active(&self, skip: i64, take: i64) -> DbResult<CouponPage> {
        self.list_active_at(skip, take, Utc::now()).await
    }

    /// Lists coupons active at `now`, newest-first.
    ///
    /// ## Consistency
    /// The page and the count run in one transaction against the same `now`,
    /// so `total` always describes the set the page was cut from.
    ///
    /// Negative `skip` or `take` are treated as zero.
    pub async fn list_active_at(
        &self,
        skip: i64,
        take: i64,
        now: DateTime<Utc>,
    ) -> DbResult<CouponPage> {
        let skip = skip.max(0);
        let take = take.max(0);
        let now_ms = now.timestamp_millis();

        let page_sql = format!(
            "SELECT {} FROM coupons WHERE {} \
             ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
            COUPON_COLUMNS, ACTIVE_FILTER
        );
        let count_sql = format!("SELECT COUNT(*) FROM coupons WHERE {}", ACTIVE_FILTER);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let rows = sqlx::query_as::<_, CouponRow>(&page_sql)
            .bind(now_ms)
            .bind(now_ms)
            .bind(take)
            .bind(skip)
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(now_ms)
            .bind(now_ms)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let coupons = rows
            .into_iter()
            .map(Coupon::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(skip, take, returned = coupons.len(), total, "Listed active coupons");
        Ok(CouponPage { coupons, total })
    }

    /// Counts coupons active right now.
    pub async fn count_active(&self) -> DbResult<i64> {
        self.count_active_at(Utc::now()).await
    }

    /// Counts coupons active at `now`.
    pub async fn count_active_at(&self, now: DateTime<Utc>) -> DbResult<i64> {
        let now_ms = now.timestamp_millis();
        let sql = format!("SELECT COUNT(*) FROM coupons WHERE {}", ACTIVE_FILTER);

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(now_ms)
            .bind(now_ms)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Gets a coupon by ID regardless of its state.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Coupon>> {
        let sql = format!("SELECT {} FROM coupons WHERE id = ?", COUPON_COLUMNS);

        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Coupon::try_from).transpose()
    }

    /// Gets a coupon by exact code regardless of its state.
    ///
    /// Admin use only; checkout goes through [`Self::find_active_by_code`].
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let sql = format!("SELECT {} FROM coupons WHERE code = ?", COUPON_COLUMNS);

        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Coupon::try_from).transpose()
    }

    /// Inserts a new coupon.
    ///
    /// ## What This Does
    /// 1. Validates the input (code format, discount value, window)
    /// 2. Assigns a UUID and `created_at`
    /// 3. Inserts and reads the stored row back
    ///
    /// ## Errors
    /// * `DbError::Validation` - the input was rejected
    /// * `DbError::UniqueViolation` - the code already exists
    pub async fn insert(&self, coupon: NewCoupon) -> DbResult<Coupon> {
        validate_new_coupon(&coupon)?;

        let id = generate_coupon_id();
        let created_at = Utc::now().timestamp_millis();

        debug!(id = %id, code = %coupon.code, "Inserting coupon");

        sqlx::query(
            "INSERT INTO coupons (id, code, discount_type, discount_value, min_purchase, \
             max_discount, is_active, starts_at, expires_at, usage_limit, usage_count, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(&id)
        .bind(&coupon.code)
        .bind(coupon.discount_type)
        .bind(money_text(coupon.discount_value))
        .bind(coupon.min_purchase.map(money_text))
        .bind(coupon.max_discount.map(money_text))
        .bind(coupon.is_active)
        .bind(coupon.starts_at.timestamp_millis())
        .bind(coupon.expires_at.timestamp_millis())
        .bind(coupon.usage_limit)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("code", coupon.code.as_str()),
            other => other,
        })?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found("Coupon", id))
    }
}

impl CouponLookup for CouponRepository {
    type Error = DbError;

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Coupon>, Self::Error> {
        CouponRepository::find_active_by_code(self, code).await
    }

    async fn list_active(&self, skip: i64, take: i64) -> Result<CouponPage, Self::Error> {
        CouponRepository::list_active(self, skip, take).await
    }
}

/// Generates a new coupon ID (UUID v4).
pub fn generate_coupon_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_coupon(code: &str) -> NewCoupon {
        let now = Utc::now();
        NewCoupon {
            code: code.to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Money::from(10),
            min_purchase: None,
            max_discount: None,
            is_active: true,
            starts_at: now - Duration::days(1),
            expires_at: now + Duration::days(7),
            usage_limit: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_active() {
        let db = test_db().await;
        let repo = db.coupons();

        let mut input = new_coupon("SAVE20");
        input.min_purchase = Some(Money::new(dec!(500.00)));
        input.max_discount = Some(Money::new(dec!(150.50)));
        input.usage_limit = Some(100);

        let inserted = repo.insert(input).await.unwrap();
        assert_eq!(inserted.code, "SAVE20");
        assert_eq!(inserted.usage_count, 0);
        assert_eq!(inserted.min_purchase, Some(Money::new(dec!(500))));
        assert_eq!(inserted.max_discount, Some(Money::new(dec!(150.5))));

        let found = repo.find_active_by_code("SAVE20").await.unwrap().unwrap();
        assert_eq!(found, inserted);
    }

    #[tokio::test]
    async fn test_inactive_states_are_invisible() {
        let db = test_db().await;
        let repo = db.coupons();
        let now = Utc::now();

        let mut expired = new_coupon("OLD5");
        expired.starts_at = now - Duration::days(30);
        expired.expires_at = now - Duration::days(1);
        repo.insert(expired).await.unwrap();

        let mut disabled = new_coupon("OFF20");
        disabled.is_active = false;
        repo.insert(disabled).await.unwrap();

        let mut future = new_coupon("SOON15");
        future.starts_at = now + Duration::days(1);
        future.expires_at = now + Duration::days(30);
        repo.insert(future).await.unwrap();

        for code in ["OLD5", "OFF20", "SOON15", "NOPE"] {
            assert!(repo.find_active_by_code(code).await.unwrap().is_none(), "{code}");
        }
        assert_eq!(repo.count_active().await.unwrap(), 0);

        // Still stored
        assert!(repo.get_by_code("OFF20").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_window_bounds_are_inclusive() {
        let db = test_db().await;
        let repo = db.coupons();

        let inserted = repo.insert(new_coupon("EDGE")).await.unwrap();

        let at_start = repo
            .find_active_by_code_at("EDGE", inserted.starts_at)
            .await
            .unwrap();
        let at_end = repo
            .find_active_by_code_at("EDGE", inserted.expires_at)
            .await
            .unwrap();
        let after_end = repo
            .find_active_by_code_at("EDGE", inserted.expires_at + Duration::milliseconds(1))
            .await
            .unwrap();

        assert!(at_start.is_some());
        assert!(at_end.is_some());
        assert!(after_end.is_none());
    }

    #[tokio::test]
    async fn test_code_matching() {
        let db = test_db().await;
        let exact = db.coupons();
        exact.insert(new_coupon("SAVE10")).await.unwrap();

        assert!(exact.find_active_by_code("save10").await.unwrap().is_none());
        assert!(exact.find_active_by_code(" SAVE10").await.unwrap().is_none());

        let relaxed = exact.clone().with_code_matching(CodeMatching::CaseInsensitive);
        let found = relaxed.find_active_by_code("save10").await.unwrap().unwrap();
        assert_eq!(found.code, "SAVE10");
        // No trimming in either mode
        assert!(relaxed.find_active_by_code("save10 ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_active_newest_first_with_total() {
        let db = test_db().await;
        let repo = db.coupons();

        for code in ["FIRST", "SECOND", "THIRD"] {
            repo.insert(new_coupon(code)).await.unwrap();
        }
        let mut disabled = new_coupon("HIDDEN");
        disabled.is_active = false;
        repo.insert(disabled).await.unwrap();

        let page = repo.list_active(0, 2).await.unwrap();
        assert_eq!(page.total, 3);
        let codes: Vec<_> = page.coupons.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["THIRD", "SECOND"]);

        let page = repo.list_active(2, 2).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.coupons.len(), 1);
        assert_eq!(page.coupons[0].code, "FIRST");

        let page = repo.list_active(10, 2).await.unwrap();
        assert!(page.coupons.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_active_negative_bounds() {
        let db = test_db().await;
        let repo = db.coupons();
        repo.insert(new_coupon("ONE")).await.unwrap();

        let page = repo.list_active(-5, 10).await.unwrap();
        assert_eq!(page.coupons.len(), 1);

        let page = repo.list_active(0, -1).await.unwrap();
        assert!(page.coupons.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = test_db().await;
        let repo = db.coupons();
        repo.insert(new_coupon("SAVE10")).await.unwrap();

        let err = repo.insert(new_coupon("SAVE10")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "code");
                assert_eq!(value, "SAVE10");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let db = test_db().await;
        let repo = db.coupons();

        let mut input = new_coupon("TOO-MUCH");
        input.discount_value = Money::from(150);

        let err = repo.insert(input).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.count_active().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_amount_is_invalid_data() {
        let db = test_db().await;
        let repo = db.coupons();
        let coupon = repo.insert(new_coupon("BROKEN")).await.unwrap();

        sqlx::query("UPDATE coupons SET discount_value = 'ten' WHERE id = ?")
            .bind(&coupon.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.find_active_by_code("BROKEN").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidData { ref column, .. } if column == "discount_value"
        ));
    }
}

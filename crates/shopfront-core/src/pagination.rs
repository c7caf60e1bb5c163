//! # Pagination
//!
//! 1-based page requests turned into SQL offsets.
//!
//! ```text
//! page=1, limit=10  →  skip 0,  take 10
//! page=2, limit=10  →  skip 10, take 10
//! page=0, limit=10  →  clamped to page 1  →  skip 0
//! page=3, limit=500 →  clamped to limit 100 → skip 200, take 100
//! ```

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A clamped, 1-based page request.
///
/// Out-of-range input is clamped rather than rejected, so the offset is
/// never negative and a page never exceeds [`MAX_PAGE_SIZE`]. Deserialized
/// requests go through the same clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

/// Wire shape of a page request, before clamping.
#[derive(Deserialize)]
struct RawPageRequest {
    page: Option<i64>,
    limit: Option<i64>,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        PageRequest::from_query(raw.page, raw.limit)
    }
}

impl PageRequest {
    /// Creates a page request, clamping `page` to `>= 1` and `limit` to
    /// `1..=MAX_PAGE_SIZE`.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::pagination::PageRequest;
    ///
    /// let req = PageRequest::new(2, 10);
    /// assert_eq!(req.offset(), 10);
    ///
    /// let clamped = PageRequest::new(0, -5);
    /// assert_eq!((clamped.page(), clamped.limit(), clamped.offset()), (1, 1, 0));
    /// ```
    pub fn new(page: i64, limit: i64) -> Self {
        PageRequest {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Builds a request from optional query parameters.
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        PageRequest::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    #[inline]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`. Saturates instead of overflowing.
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed for `total` rows.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let limit = self.limit.max(1);
        (total - 1) / limit + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(1, DEFAULT_PAGE_SIZE)
    }
}

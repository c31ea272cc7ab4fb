//! Pagination helpers
//!
//! 1-based page/page_size query parameters and the pagination metadata
//! returned alongside listing responses.

use serde::{Deserialize, Serialize};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Query params for paginated listings
///
/// Values below 1 are clamped rather than rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageQuery {
    /// Clamp page and page_size to at least 1
    pub fn clamped(&self) -> (i64, i64) {
        (self.page.max(1), self.page_size.max(1))
    }

    /// Number of records to skip for the clamped page
    pub fn skip(&self) -> i64 {
        let (page, page_size) = self.clamped();
        (page - 1) * page_size
    }
}

/// Pagination metadata for a listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Build metadata from a clamped page query and the total match count
    pub fn new(query: &PageQuery, total_items: i64) -> Self {
        let (page, page_size) = query.clamped();
        let total_pages = (total_items + page_size - 1) / page_size;
        Self {
            current_page: page,
            total_pages,
            total_items,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, page_size: i64) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn test_last_partial_page() {
        // 25 matching orders, pageSize=10, page 3
        let meta = Pagination::new(&query(3, 10), 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
        assert_eq!(meta.current_page, 3);
    }

    #[test]
    fn test_first_page() {
        let meta = Pagination::new(&query(1, 10), 25);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_exact_multiple() {
        let meta = Pagination::new(&query(2, 10), 20);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_empty() {
        let meta = Pagination::new(&query(1, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_clamps_below_one() {
        let q = query(0, -5);
        assert_eq!(q.clamped(), (1, 1));
        assert_eq!(q.skip(), 0);

        let meta = Pagination::new(&q, 3);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_skip() {
        assert_eq!(query(3, 10).skip(), 20);
        assert_eq!(query(1, 10).skip(), 0);
    }
}

//! Pagination request clamping and derived metadata.

use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_records: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Clamp to sane values: absent or non-positive page/limit fall back to
    /// page 1 and the default limit before any offset arithmetic happens.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        PageRequest {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            limit: limit.filter(|l| *l >= 1).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Derive pagination metadata from the total record count.
    pub fn meta(&self, total_records: i64) -> PageMeta {
        let limit = if self.limit <= 0 { Self::DEFAULT_LIMIT } else { self.limit };
        let total_pages = (total_records + limit - 1) / limit;
        PageMeta {
            total_records,
            total_pages,
            page: self.page,
            limit,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_invalid_page_and_limit() {
        let page = PageRequest::new(Some(0), Some(-3));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, PageRequest::DEFAULT_LIMIT);
        assert_eq!(page.offset(), 0);

        let page = PageRequest::new(None, None);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn offset_grows_with_page() {
        let page = PageRequest::new(Some(4), Some(25));
        assert_eq!(page.offset(), 75);
    }

    #[test]
    fn meta_for_95_records_limit_10() {
        let meta = PageRequest::new(Some(10), Some(10)).meta(95);
        assert_eq!(meta.total_pages, 10);
        assert!(!meta.has_next);
        assert!(meta.has_prev);

        let first = PageRequest::new(Some(1), Some(10)).meta(95);
        assert_eq!(first.total_pages, 10);
        assert!(first.has_next);
        assert!(!first.has_prev);
    }

    #[test]
    fn meta_for_empty_result() {
        let meta = PageRequest::new(Some(1), Some(10)).meta(0);
        assert_eq!(meta.total_records, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn meta_for_exact_multiple() {
        let meta = PageRequest::new(Some(2), Some(10)).meta(20);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }
}

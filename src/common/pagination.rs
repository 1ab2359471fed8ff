// src/common/pagination.rs

use serde::{Deserialize, Serialize};

use crate::common::thresholds::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page and limit as they arrive on the query string, before clamping.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Builds a page from one already-fetched slice of rows and the full row count.
    pub fn new(items: Vec<T>, params: PageParams, total: i64) -> Self {
        let limit = params.limit();
        Self {
            items,
            page: params.page(),
            limit,
            total,
            total_pages: total.saturating_add(limit - 1) / limit,
        }
    }

    /// Cuts one page out of a complete in-memory list.
    pub fn from_vec(all: Vec<T>, params: PageParams) -> Self {
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(usize::try_from(params.offset()).unwrap_or(usize::MAX))
            .take(params.limit() as usize)
            .collect();
        Self::new(items, params, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i64, limit: i64) -> PageParams {
        PageParams { page: Some(page), limit: Some(limit) }
    }

    #[test]
    fn params_are_clamped() {
        let p = PageParams { page: Some(0), limit: Some(500) };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), MAX_PAGE_SIZE);

        let defaults = PageParams::default();
        assert_eq!(defaults.page(), 1);
        assert_eq!(defaults.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(defaults.offset(), 0);
    }

    #[test]
    fn from_vec_cuts_requested_page() {
        let page = Page::from_vec((1..=25).collect::<Vec<_>>(), params(3, 10));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = Page::from_vec(vec![1, 2, 3], params(5, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn huge_page_number_yields_an_empty_page() {
        let p = params(i64::MAX, 100);
        assert_eq!(p.offset(), i64::MAX);

        let page = Page::from_vec(vec![1, 2, 3], p);
        assert!(page.items.is_empty());
        assert_eq!(page.page, i64::MAX);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_list_has_zero_pages() {
        let page: Page<i32> = Page::from_vec(Vec::new(), PageParams::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }
}

//! Pagination view over filtered collections
//!
//! # Example
//! ```rust
//! use backstage::core::query::{paginate, PageIndexing};
//!
//! let albums: Vec<u32> = (1..=25).collect();
//! let page = paginate(albums, 3, 12, PageIndexing::OneBased);
//! assert_eq!(page.items, vec![25]);
//! assert_eq!(page.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of rows per page when neither schema nor config sets one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page numbering convention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageIndexing {
    /// First page is 0
    ZeroBased,
    /// First page is 1
    #[default]
    OneBased,
}

impl PageIndexing {
    /// Index of the first page
    pub fn first(self) -> usize {
        match self {
            PageIndexing::ZeroBased => 0,
            PageIndexing::OneBased => 1,
        }
    }

    /// Index of the last page for a given page count
    pub fn last(self, total_pages: usize) -> usize {
        self.first() + total_pages.max(1) - 1
    }

    /// Zero-based position of `page`, `None` when it precedes the first page
    fn position(self, page: usize) -> Option<usize> {
        page.checked_sub(self.first())
    }
}

/// Number of pages needed to show `total` items, never less than 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Current page and page size of a list view
///
/// Invariant once clamped: `first <= page <= first + total_pages - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
    indexing: PageIndexing,
}

impl PaginationState {
    /// Start on the first page; a page size of 0 is treated as 1
    pub fn new(page_size: usize, indexing: PageIndexing) -> Self {
        Self {
            page: indexing.first(),
            page_size: page_size.max(1),
            indexing,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn indexing(&self) -> PageIndexing {
        self.indexing
    }

    /// Jump to a page without clamping; call [`clamp`](Self::clamp) before slicing
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn first_page(&mut self) {
        self.page = self.indexing.first();
    }

    /// Bring the page index back into range for `total` filtered items
    ///
    /// Returns true when the index had to move.
    pub fn clamp(&mut self, total: usize) -> bool {
        let first = self.indexing.first();
        let last = self.indexing.last(total_pages(total, self.page_size));
        let clamped = self.page.clamp(first, last);
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Slice `items` at the current page
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        paginate(items, self.page, self.page_size, self.indexing)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, PageIndexing::default())
    }
}

/// One page of a filtered collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items visible on this page
    pub items: Vec<T>,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// Pagination metadata
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Requested page number
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,

    /// 1-based position of the first visible item, 0 when the page is empty
    pub range_start: usize,

    /// 1-based position of the last visible item, 0 when the page is empty
    pub range_end: usize,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total: usize, indexing: PageIndexing) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total, page_size);
        let start = indexing.position(page).and_then(|p| p.checked_mul(page_size));
        let (range_start, range_end) = match start {
            Some(start) if start < total => (start + 1, (start + page_size).min(total)),
            _ => (0, 0),
        };

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: indexing.position(page).is_some_and(|p| p.saturating_add(1) < total_pages),
            has_prev: indexing.position(page).is_some_and(|p| p > 0),
            range_start,
            range_end,
        }
    }
}

/// Slice a filtered collection into one page
///
/// A page index outside `[first, last]` yields an empty page rather than
/// panicking; a page size of 0 is treated as 1.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize, indexing: PageIndexing) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let meta = PaginationMeta::new(page, page_size, total, indexing);

    let visible = match indexing.position(page).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if start < total => items.into_iter().skip(start).take(page_size).collect(),
        _ => Vec::new(),
    };

    Page {
        items: visible,
        total_pages: meta.total_pages,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_never_below_one() {
        assert_eq!(total_pages(0, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_paginate_one_based() {
        let items: Vec<u32> = (1..=25).collect();
        let first = paginate(items.clone(), 1, 12, PageIndexing::OneBased);
        assert_eq!(first.items, (1..=12).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(first.meta.has_next);
        assert!(!first.meta.has_prev);

        let last = paginate(items, 3, 12, PageIndexing::OneBased);
        assert_eq!(last.items, vec![25]);
        assert!(!last.meta.has_next);
        assert!(last.meta.has_prev);
        assert_eq!((last.meta.range_start, last.meta.range_end), (25, 25));
    }

    #[test]
    fn test_paginate_zero_based() {
        let items: Vec<u32> = (0..10).collect();
        let page = paginate(items, 1, 4, PageIndexing::ZeroBased);
        assert_eq!(page.items, vec![4, 5, 6, 7]);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.meta.range_start, page.meta.range_end), (5, 8));
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(items.clone(), 9, 2, PageIndexing::OneBased).items.is_empty());
        assert!(paginate(items.clone(), 0, 2, PageIndexing::OneBased).items.is_empty());
        assert!(paginate(items, usize::MAX, 2, PageIndexing::ZeroBased).items.is_empty());
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<u32>::new(), 1, 10, PageIndexing::OneBased);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.meta.has_next);
        assert_eq!(page.meta.range_start, 0);
    }

    #[test]
    fn test_clamp_stale_page_after_narrowing() {
        let mut state = PaginationState::new(12, PageIndexing::OneBased);
        state.set_page(3);
        assert!(!state.clamp(25));
        assert_eq!(state.page(), 3);

        // Filter narrowed the set to 4 items
        assert!(state.clamp(4));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_clamp_empty_goes_to_first_page() {
        let mut state = PaginationState::new(10, PageIndexing::ZeroBased);
        state.set_page(4);
        state.clamp(0);
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_clamp_lifts_page_below_first() {
        let mut state = PaginationState::new(10, PageIndexing::OneBased);
        state.set_page(0);
        assert!(state.clamp(30));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let state = PaginationState::new(0, PageIndexing::OneBased);
        assert_eq!(state.page_size(), 1);
    }
}

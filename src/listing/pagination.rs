//! Pagination state and the pager window rendered by templates.

use serde::Serialize;

/// Page size used when the URL does not specify `per_page`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page number accepted from the URL; larger values clamp here so
/// offset arithmetic can never overflow.
pub const MAX_PAGE: usize = 1_000_000;

/// Largest page size accepted from the URL.
pub const MAX_PAGE_SIZE: usize = 200;

/// Read-only mirror of the totals computed by the last repository query.
///
/// Navigation helpers consult it but never recompute it; until the first
/// query resolves there simply is no meta and navigation towards the end of
/// the list is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    /// Derives meta from a query's total row count and the requested window.
    pub fn from_total(total_items: usize, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        Self {
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Current page and page size, plus the navigation helpers UI code needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
    initial_page: usize,
    initial_page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Creates a state clamped to `page >= 1` and `page_size >= 1`.
    pub fn new(page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        Self {
            page,
            page_size,
            initial_page: page,
            initial_page_size: page_size,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn go_to_first_page(&mut self) {
        self.page = 1;
    }

    /// Jumps to the last known page; no-op while meta is not yet loaded.
    pub fn go_to_last_page(&mut self, meta: Option<&PageMeta>) {
        if let Some(meta) = meta {
            self.page = meta.total_pages.max(1);
        }
    }

    /// Advances one page, but only when the server reported a next page.
    pub fn go_to_next_page(&mut self, meta: Option<&PageMeta>) {
        if self.can_go_next(meta) {
            self.page += 1;
        }
    }

    /// Goes back one page, floored at page 1.
    pub fn go_to_prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn can_go_next(&self, meta: Option<&PageMeta>) -> bool {
        meta.is_some_and(|m| m.has_next_page)
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// Restores the page and page size this state was created with.
    pub fn reset(&mut self) {
        self.page = self.initial_page;
        self.page_size = self.initial_page_size;
    }
}

/// One page of rows together with the pager window for the template.
///
/// `pages` holds page numbers interleaved with `None` gaps, e.g.
/// `1 2 … 6 7 8 … 41 42` around page 7.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, meta: PageMeta) -> Self {
        let page = page.max(1);
        let pages = page_window(meta.total_pages, page, 2, 2, 4, 2);
        Self {
            items,
            pages,
            page,
            meta,
        }
    }
}

/// Computes the pager window: `left_edge` pages at the start, `right_edge`
/// pages at the end, and `left_current..right_current` pages around the
/// current one, with `None` marking each elided gap.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut pages = Vec::new();

    // Saturating throughout: the current page comes from the URL and may sit
    // far past the end of the list.
    let left_end = (1 + left_edge).min(total_pages.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(total_pages.saturating_add(1));
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(right_edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

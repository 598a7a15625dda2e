//! Binding between the URL query string and a server-driven table.
//!
//! The table never re-sorts, re-pages or re-filters locally: repositories
//! receive this state and return the exact page of rows to render.

use serde::Serialize;

use crate::listing::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE};
use crate::listing::params::{ORDER_BY, ORDER_DIR, PAGE, PER_PAGE, QueryState};

/// Single-column sort descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    fn dir_str(&self) -> &'static str {
        if self.descending { "desc" } else { "asc" }
    }
}

/// Typed pagination/sort state decoded from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    page_index: usize,
    page_size: usize,
    sort: Vec<SortSpec>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl TableState {
    /// Decodes the reserved parameters, with explicit fallbacks.
    ///
    /// A missing or non-numeric `page`/`per_page` yields page 1 / size 10
    /// rather than relying on parse quirks; absurdly large values clamp to
    /// [`MAX_PAGE`]/[`MAX_PAGE_SIZE`] so a crafted URL cannot overflow the
    /// offset math downstream. A missing `orderBy` yields an empty sort
    /// sequence, and `orderDir` defaults to ascending unless it spells
    /// `desc` (case-insensitive).
    pub fn from_query(query: &QueryState) -> Self {
        let page = query
            .get(PAGE)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
            .min(MAX_PAGE);
        let page_size = query
            .get(PER_PAGE)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        let sort = query
            .get(ORDER_BY)
            .filter(|col| !col.is_empty())
            .map(|col| SortSpec {
                column: col.to_string(),
                descending: query
                    .get(ORDER_DIR)
                    .is_some_and(|dir| dir.eq_ignore_ascii_case("desc")),
            })
            .into_iter()
            .collect();

        Self {
            page_index: page - 1,
            page_size,
            sort,
        }
    }

    /// 0-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// 1-based page number, as it appears in the URL.
    pub fn page(&self) -> usize {
        self.page_index + 1
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero- or one-element sort sequence; single-column sort only.
    pub fn sort(&self) -> &[SortSpec] {
        &self.sort
    }

    pub fn primary_sort(&self) -> Option<&SortSpec> {
        self.sort.first()
    }

    /// Writes a sort change back to the query string.
    ///
    /// A new column replaces the previous one; `None` deletes both sort keys.
    /// Either way the translator resets the page.
    pub fn apply_sort(query: &mut QueryState, sort: Option<&SortSpec>) {
        match sort {
            Some(spec) => query.set_params([
                (ORDER_BY, Some(spec.column.as_str())),
                (ORDER_DIR, Some(spec.dir_str())),
            ]),
            None => query.set_params([(ORDER_BY, None::<&str>), (ORDER_DIR, None)]),
        }
    }

    /// Writes a pagination change back to the query string (1-based `page`).
    pub fn apply_page(query: &mut QueryState, page_index: usize, page_size: usize) {
        let page = (page_index + 1).to_string();
        let per_page = page_size.to_string();
        query.set_params([
            (PER_PAGE, Some(per_page.as_str())),
            (PAGE, Some(page.as_str())),
        ]);
    }

    /// Next sort state when the header of `column` is clicked:
    /// unsorted -> ascending -> descending -> unsorted.
    pub fn toggle_sort(&self, column: &str) -> Option<SortSpec> {
        match self.primary_sort() {
            Some(spec) if spec.column == column => {
                if spec.descending {
                    None
                } else {
                    Some(SortSpec::desc(column))
                }
            }
            _ => Some(SortSpec::asc(column)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let state = TableState::from_query(&QueryState::default());
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert!(state.sort().is_empty());
    }

    #[test]
    fn defaults_when_non_numeric() {
        let query = QueryState::parse("page=abc&per_page=-5");
        let state = TableState::from_query(&query);
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn huge_values_clamp_instead_of_overflowing() {
        let query = QueryState::parse("page=18446744073709551615&per_page=5000000000000000000");
        let state = TableState::from_query(&query);
        assert_eq!(state.page(), MAX_PAGE);
        assert_eq!(state.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn page_three_is_index_two() {
        let query = QueryState::parse("page=3&per_page=10");
        let state = TableState::from_query(&query);
        assert_eq!(state.page_index(), 2);
        assert_eq!(state.page_size(), 10);
    }

    #[test]
    fn sort_roundtrip() {
        let mut query = QueryState::default();
        TableState::apply_sort(&mut query, Some(&SortSpec::desc("amount")));
        assert_eq!(query.get(ORDER_BY), Some("amount"));
        assert_eq!(query.get(ORDER_DIR), Some("desc"));

        let decoded = TableState::from_query(&query);
        assert_eq!(decoded.sort(), &[SortSpec::desc("amount")]);
    }

    #[test]
    fn order_dir_defaults_to_asc() {
        let query = QueryState::parse("orderBy=amount");
        let state = TableState::from_query(&query);
        assert_eq!(state.sort(), &[SortSpec::asc("amount")]);

        let query = QueryState::parse("orderBy=amount&orderDir=sideways");
        let state = TableState::from_query(&query);
        assert_eq!(state.sort(), &[SortSpec::asc("amount")]);
    }

    #[test]
    fn clearing_sort_removes_both_keys() {
        let mut query = QueryState::parse("orderBy=amount&orderDir=desc&page=3");
        TableState::apply_sort(&mut query, None);
        assert!(query.get(ORDER_BY).is_none());
        assert!(query.get(ORDER_DIR).is_none());
        // Sort changes restart pagination.
        assert_eq!(query.get(PAGE), Some("1"));
    }

    #[test]
    fn sort_change_resets_page() {
        let mut query = QueryState::parse("page=5");
        TableState::apply_sort(&mut query, Some(&SortSpec::asc("borrower")));
        assert_eq!(query.get(PAGE), Some("1"));
    }

    #[test]
    fn apply_page_writes_one_based() {
        let mut query = QueryState::default();
        TableState::apply_page(&mut query, 2, 25);
        assert_eq!(query.get(PAGE), Some("3"));
        assert_eq!(query.get(PER_PAGE), Some("25"));
    }

    #[test]
    fn toggle_cycles_through_states() {
        let unsorted = TableState::default();
        assert_eq!(unsorted.toggle_sort("amount"), Some(SortSpec::asc("amount")));

        let asc = TableState::from_query(&QueryState::parse("orderBy=amount"));
        assert_eq!(asc.toggle_sort("amount"), Some(SortSpec::desc("amount")));

        let desc = TableState::from_query(&QueryState::parse("orderBy=amount&orderDir=desc"));
        assert_eq!(desc.toggle_sort("amount"), None);
        // A different column always starts ascending.
        assert_eq!(desc.toggle_sort("borrower"), Some(SortSpec::asc("borrower")));
    }
}

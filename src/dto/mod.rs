//! Page-data structs handed to templates, plus the link builders that turn
//! listing state back into hrefs.

use serde::Serialize;

use crate::listing::{QueryState, SortSpec, TableState};

pub mod api;
pub mod fees;
pub mod loans;
pub mod transactions;

/// One sortable column header: the href encodes the *next* sort state.
#[derive(Debug, Clone, Serialize)]
pub struct SortLink {
    pub column: String,
    pub label: String,
    pub href: String,
    /// `asc`/`desc` when this column is the active sort, `None` otherwise.
    pub direction: Option<&'static str>,
}

/// Builds a header link per `(column, label)` pair.
///
/// Clicking cycles unsorted -> asc -> desc -> unsorted; the page resets to 1
/// on every transition because the sort keys go through the translator.
pub fn sort_links(
    path: &str,
    query: &QueryState,
    state: &TableState,
    columns: &[(&str, &str)],
) -> Vec<SortLink> {
    columns
        .iter()
        .map(|(column, label)| {
            let mut next = query.clone();
            TableState::apply_sort(&mut next, state.toggle_sort(column).as_ref());
            let direction = state
                .primary_sort()
                .filter(|s| s.column == *column)
                .map(|s: &SortSpec| if s.descending { "desc" } else { "asc" });
            SortLink {
                column: column.to_string(),
                label: label.to_string(),
                href: next.target(path),
                direction,
            }
        })
        .collect()
}

/// One pager cell: a page number with its href, or an elided gap.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub page: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

/// Turns the pager window into links that preserve every other parameter.
pub fn pager_links(
    path: &str,
    query: &QueryState,
    pages: &[Option<usize>],
    current: usize,
) -> Vec<PageLink> {
    pages
        .iter()
        .map(|page| match page {
            Some(page) => {
                let mut next = query.clone();
                next.set_param("page", Some(&page.to_string()));
                PageLink {
                    page: Some(*page),
                    href: Some(next.target(path)),
                    current: *page == current,
                }
            }
            None => PageLink {
                page: None,
                href: None,
                current: false,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_link_cycle_and_direction() {
        let query = QueryState::parse("orderBy=amount&orderDir=desc&status=DUE");
        let state = TableState::from_query(&query);
        let links = sort_links("/fees", &query, &state, &[("amount", "Amount"), ("due_date", "Due")]);

        let amount = &links[0];
        assert_eq!(amount.direction, Some("desc"));
        // Third click clears the sort; filters survive, page resets.
        assert_eq!(amount.href, "/fees?status=DUE&page=1");

        let due = &links[1];
        assert_eq!(due.direction, None);
        assert!(due.href.contains("orderBy=due_date"));
        assert!(due.href.contains("orderDir=asc"));
    }

    #[test]
    fn pager_links_preserve_filters() {
        let query = QueryState::parse("status=DUE&page=2");
        let links = pager_links("/fees", &query, &[Some(1), Some(2), None, Some(9)], 2);
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].href.as_deref(), Some("/fees?status=DUE&page=1"));
        assert!(links[1].current);
        assert!(links[2].href.is_none());
        assert_eq!(links[3].href.as_deref(), Some("/fees?status=DUE&page=9"));
    }
}

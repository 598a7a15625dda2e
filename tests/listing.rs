//! End-to-end walks through the listing state machinery, driving it the way
//! the handlers do: parse the query string, mutate state, read the redirect
//! target back out.

use std::time::{Duration, Instant};

use finadmin::listing::debounce::Debouncer;
use finadmin::listing::{
    DEFAULT_PAGE_SIZE, FilterState, MAX_PAGE, MAX_PAGE_SIZE, PageMeta, PageState, Paginated,
    QueryState, SortSpec, TableState,
};

#[test]
fn test_filter_change_resets_pagination_but_keeps_sort() {
    let mut query = QueryState::parse("page=4&orderBy=amount&orderDir=desc");
    query.set_param("status", Some("DUE"));

    assert_eq!(query.get("page"), Some("1"));
    assert_eq!(query.get("orderBy"), Some("amount"));
    assert_eq!(query.get("orderDir"), Some("desc"));

    let state = TableState::from_query(&query);
    assert_eq!(state.page(), 1);
    assert_eq!(state.primary_sort(), Some(&SortSpec::desc("amount")));

    let filters = FilterState::from_query(&query);
    assert_eq!(filters.get("status"), Some("DUE"));
}

#[test]
fn test_sort_toggle_cycles_and_resets_page() {
    let mut query = QueryState::parse("page=3&status=DUE");
    let state = TableState::from_query(&query);

    // First click: ascending.
    TableState::apply_sort(&mut query, state.toggle_sort("amount").as_ref());
    assert_eq!(query.get("orderBy"), Some("amount"));
    assert_eq!(query.get("orderDir"), Some("asc"));
    assert_eq!(query.get("page"), Some("1"));

    // Second click: descending.
    let state = TableState::from_query(&query);
    TableState::apply_sort(&mut query, state.toggle_sort("amount").as_ref());
    assert_eq!(query.get("orderDir"), Some("desc"));

    // Third click: unsorted, filter still present.
    let state = TableState::from_query(&query);
    TableState::apply_sort(&mut query, state.toggle_sort("amount").as_ref());
    assert!(query.get("orderBy").is_none());
    assert!(query.get("orderDir").is_none());
    assert_eq!(query.get("status"), Some("DUE"));
}

#[test]
fn test_page_navigation_preserves_filters_and_sort() {
    let mut query = QueryState::parse("status=DUE&orderBy=due_date&orderDir=asc&page=2");
    TableState::apply_page(&mut query, 4, DEFAULT_PAGE_SIZE);

    assert_eq!(query.get("page"), Some("5"));
    assert_eq!(query.get("status"), Some("DUE"));
    assert_eq!(query.get("orderBy"), Some("due_date"));
    assert!(query.target("/fees").starts_with("/fees?"));
}

#[test]
fn test_malformed_reserved_params_fall_back_to_defaults() {
    let query = QueryState::parse("page=banana&per_page=-3&orderBy=amount&orderDir=sideways");
    let state = TableState::from_query(&query);

    assert_eq!(state.page(), 1);
    assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
    // Unknown direction falls back to ascending rather than erroring.
    assert_eq!(state.primary_sort(), Some(&SortSpec::asc("amount")));
}

#[test]
fn test_extreme_page_values_clamp_and_still_render() {
    // Well-formed but absurd numbers are a valid URL; they must clamp, not
    // panic anywhere between decode and pager rendering.
    let query = QueryState::parse("page=18446744073709551615&per_page=5000000000000000000");
    let state = TableState::from_query(&query);
    assert_eq!(state.page(), MAX_PAGE);
    assert_eq!(state.page_size(), MAX_PAGE_SIZE);

    let meta = PageMeta::from_total(35, state.page(), state.page_size());
    let paginated = Paginated::new(Vec::<i32>::new(), state.page(), meta);
    assert!(paginated.items.is_empty());
    assert_eq!(paginated.pages.last(), Some(&Some(meta.total_pages)));
}

#[test]
fn test_page_state_navigation_respects_meta() {
    let meta = PageMeta::from_total(35, 2, 10);
    assert_eq!(meta.total_pages, 4);
    assert!(meta.has_next_page);
    assert!(meta.has_prev_page);

    let mut page = PageState::new(2, 10);
    page.go_to_next_page(Some(&meta));
    assert_eq!(page.page(), 3);

    page.go_to_last_page(Some(&meta));
    assert_eq!(page.page(), 4);

    // At the last page the meta says there is no next page.
    let last = PageMeta::from_total(35, 4, 10);
    assert!(!last.has_next_page);
    page.go_to_next_page(Some(&last));
    assert_eq!(page.page(), 4);

    page.go_to_first_page();
    assert_eq!(page.page(), 1);
    page.go_to_prev_page();
    assert_eq!(page.page(), 1);
}

#[test]
fn test_debouncer_emits_only_final_value() {
    let mut debouncer = Debouncer::new(Duration::from_millis(300));
    let start = Instant::now();

    debouncer.push("a", start);
    debouncer.push("al", start + Duration::from_millis(100));
    debouncer.push("ali", start + Duration::from_millis(200));

    // Still inside the window: nothing fires.
    assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
    assert_eq!(
        debouncer.poll(start + Duration::from_millis(500)),
        Some("ali".into())
    );
    // Fires once, then stays quiet.
    assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
}

//! Filter state and the active-filter badges shown above each table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::listing::params::{QueryState, RESERVED_KEYS};

/// Shown while a lookup dataset backing a filter label has not loaded yet.
pub const LOOKUP_PENDING: &str = "…";

/// The non-reserved query parameters: one entry per active filter field.
///
/// An absent key and an empty value both mean "no filter applied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn from_query(query: &QueryState) -> Self {
        let values = query
            .iter()
            .filter(|(k, v)| !RESERVED_KEYS.contains(&k.as_str()) && !v.trim().is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One human-readable chip describing an active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterBadge {
    pub key: String,
    pub text: String,
}

/// Derives badges for every filter key the resolver recognizes.
///
/// `resolve` maps `(key, value)` to display text; returning `None` skips the
/// key (unrecognized filters produce no badge). No active filters means no
/// badges, which the template renders as nothing at all.
pub fn active_badges<F>(filters: &FilterState, resolve: F) -> Vec<FilterBadge>
where
    F: Fn(&str, &str) -> Option<String>,
{
    filters
        .iter()
        .filter_map(|(key, value)| {
            resolve(key, value).map(|text| FilterBadge {
                key: key.to_string(),
                text,
            })
        })
        .collect()
}

/// Resolves an id-valued filter against a lookup dataset.
///
/// `items` is `None` while the lookup has not been fetched; the badge then
/// shows a placeholder instead of blocking.
pub fn lookup_label<T, M, N>(items: Option<&[T]>, matches: M, name: N) -> String
where
    M: Fn(&T) -> bool,
    N: Fn(&T) -> String,
{
    match items {
        None => LOOKUP_PENDING.to_string(),
        Some(items) => items
            .iter()
            .find(|item| matches(item))
            .map(name)
            .unwrap_or_else(|| LOOKUP_PENDING.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LoanTypeStub {
        id: i32,
        name: &'static str,
    }

    fn resolve_stub(key: &str, value: &str) -> Option<String> {
        match key {
            "search" => Some(format!("Search: {value}")),
            "status" => Some(format!("Status: {value}")),
            _ => None,
        }
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let query = QueryState::parse("page=2&per_page=10&orderBy=amount&orderDir=desc");
        let filters = FilterState::from_query(&query);
        assert!(filters.is_empty());
    }

    #[test]
    fn empty_values_count_as_absent() {
        let query = QueryState::parse("search=&status=DUE");
        let filters = FilterState::from_query(&query);
        assert!(filters.get("search").is_none());
        assert_eq!(filters.get("status"), Some("DUE"));
    }

    #[test]
    fn no_filters_no_badges() {
        let filters = FilterState::from_query(&QueryState::parse("page=3"));
        assert!(active_badges(&filters, resolve_stub).is_empty());
    }

    #[test]
    fn one_badge_per_recognized_key() {
        let query = QueryState::parse("search=ali&status=DUE&unknown=zzz");
        let filters = FilterState::from_query(&query);
        let badges = active_badges(&filters, resolve_stub);
        assert_eq!(badges.len(), 2);
        assert!(badges.iter().any(|b| b.key == "search" && b.text == "Search: ali"));
        assert!(badges.iter().any(|b| b.key == "status" && b.text == "Status: DUE"));
    }

    #[test]
    fn lookup_label_resolves_by_id() {
        let types = [
            LoanTypeStub { id: 1, name: "Micro" },
            LoanTypeStub { id: 2, name: "Mortgage" },
        ];
        let label = lookup_label(Some(&types), |t| t.id == 2, |t| t.name.to_string());
        assert_eq!(label, "Mortgage");
    }

    #[test]
    fn lookup_label_placeholder_when_not_loaded() {
        let label = lookup_label::<LoanTypeStub, _, _>(None, |t| t.id == 2, |t| t.name.to_string());
        assert_eq!(label, LOOKUP_PENDING);
    }
}

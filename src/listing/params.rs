//! Bidirectional mapping between a URL query string and typed parameters.

use std::fmt::{Display, Formatter};

/// 1-based page number.
pub const PAGE: &str = "page";
/// Page size.
pub const PER_PAGE: &str = "per_page";
/// Sort column id.
pub const ORDER_BY: &str = "orderBy";
/// Sort direction, `asc` or `desc`.
pub const ORDER_DIR: &str = "orderDir";

/// Keys owned by the listing machinery; everything else is a filter.
pub const RESERVED_KEYS: [&str; 4] = [PAGE, PER_PAGE, ORDER_BY, ORDER_DIR];

/// Ordered view over the query string of a listing page.
///
/// Mutators mirror the invariant that pagination must restart whenever
/// anything other than the page itself changes: stale page numbers would
/// otherwise request out-of-range pages after a filter or sort change.
/// Mutations are applied synchronously in call order; the route performs the
/// actual navigation by redirecting to [`QueryState::target`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pairs: Vec<(String, String)>,
}

impl QueryState {
    /// Parses a raw query string, tolerating malformed input.
    ///
    /// Values that fail to decode are dropped wholesale rather than treated
    /// as an error; readers fall back to their defaults downstream.
    pub fn parse(query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_html_form::from_str(query).unwrap_or_default();
        Self { pairs }
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.pairs.iter()
    }

    /// Replaces the value under `key` in place, or appends it.
    ///
    /// Later duplicates are dropped so the replacement cannot be shadowed.
    fn put(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value.to_string();
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if k == key {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    fn reset_page(&mut self) {
        self.put(PAGE, "1");
    }

    /// Sets `key` to `value`, or deletes it when the value is absent/blank.
    ///
    /// Any call for a key other than `page` resets `page` to 1.
    pub fn set_param(&mut self, key: &str, value: Option<&str>) {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.put(key, v),
            None => self.delete(key),
        }
        if key != PAGE {
            self.reset_page();
        }
    }

    /// Batched [`QueryState::set_param`].
    ///
    /// The page is reset at most once, and only when the batch touches a
    /// non-`page` key without also setting `page` explicitly.
    pub fn set_params<K, V, I>(&mut self, params: I)
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        let mut touched_other = false;
        let mut touched_page = false;
        for (key, value) in params {
            let key = key.as_ref();
            match key {
                PAGE => touched_page = true,
                _ => touched_other = true,
            }
            match value.as_ref().map(|v| v.as_ref().trim()).filter(|v| !v.is_empty()) {
                Some(v) => self.put(key, v),
                None => self.delete(key),
            }
        }
        if touched_other && !touched_page {
            self.reset_page();
        }
    }

    /// Deletes one key; resets the page unless the key is `page` itself.
    pub fn remove_param(&mut self, key: &str) {
        self.delete(key);
        if key != PAGE {
            self.reset_page();
        }
    }

    /// Clears every parameter.
    pub fn reset(&mut self) {
        self.pairs.clear();
    }

    /// Serializes back to a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        serde_html_form::to_string(&self.pairs).unwrap_or_default()
    }

    /// Builds the navigation target for `path`: the bare path when no
    /// parameters remain, `path?query` otherwise.
    pub fn target(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl Display for QueryState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

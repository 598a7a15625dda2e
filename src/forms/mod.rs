//! HTTP form payloads.
//!
//! Filter forms do not mutate state themselves; they are translated into a
//! parameter batch for the query-string translator.

pub mod fees;
pub mod loans;
pub mod transactions;

/// Normalizes an optional form field: blank means "clear this filter".
pub(crate) fn field(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::listing::{PageMeta, TableState};

/// Pagination block of the list envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMeta {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// The `{data, meta}` wrapper shape used by paginated list responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    pub meta: EnvelopeMeta,
}

impl<T> Envelope<T> {
    pub fn new(data: Vec<T>, state: &TableState, meta: PageMeta) -> Self {
        Self {
            data,
            meta: EnvelopeMeta {
                page: state.page(),
                per_page: state.page_size(),
                total_items: meta.total_items,
                total_pages: meta.total_pages,
                has_next_page: meta.has_next_page,
                has_prev_page: meta.has_prev_page,
            },
        }
    }
}

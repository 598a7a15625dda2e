//! Server-driven listing state.
//!
//! Every paginated screen in the application shares the same contract: the
//! request query string is the single source of truth for pagination, sorting
//! and filtering. Handlers parse it into typed state, repositories apply that
//! state server-side (limit/offset, ORDER BY, WHERE), and templates render
//! exactly the rows they are given. Mutations happen by redirecting to a new
//! query string, never by editing component state.
//!
//! Reserved query parameters:
//!
//! | param      | meaning             | default             |
//! |------------|---------------------|---------------------|
//! | `page`     | 1-based page number | `1`                 |
//! | `per_page` | page size           | `10`                |
//! | `orderBy`  | sort column id      | absent = unsorted   |
//! | `orderDir` | `asc` \| `desc`     | `asc` when `orderBy` is set |
//!
//! Any other key is a filter; an absent or empty value means "no filter".

pub mod debounce;
pub mod filters;
pub mod pagination;
pub mod params;
pub mod table;

pub use debounce::Debouncer;
pub use filters::{FilterBadge, FilterState};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE, PageMeta, PageState, Paginated};
pub use params::QueryState;
pub use table::{SortSpec, TableState};

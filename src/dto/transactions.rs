//! Page data for the transactions screen.

use serde::Serialize;

use crate::domain::account::Account;
use crate::domain::transaction::Transaction;
use crate::dto::{PageLink, SortLink};
use crate::listing::{FilterBadge, Paginated};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionFilterEcho {
    pub search: Option<String>,
    pub account: Option<String>,
    pub entry: Option<String>,
}

#[derive(Serialize)]
pub struct TransactionsPageData {
    pub transactions: Paginated<Transaction>,
    /// Lookup dataset backing the `account` filter selector and badges.
    pub accounts: Vec<Account>,
    pub badges: Vec<FilterBadge>,
    pub sort_links: Vec<SortLink>,
    pub pager: Vec<PageLink>,
    pub filters: TransactionFilterEcho,
    pub reset_href: String,
}

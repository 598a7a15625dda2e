//! Page data for the subscription fees screen.

use serde::Serialize;

use crate::domain::account::Account;
use crate::domain::subscription_fee::SubscriptionFee;
use crate::dto::{PageLink, SortLink};
use crate::listing::{FilterBadge, Paginated};

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeeFilterEcho {
    pub search: Option<String>,
    pub account: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct FeesPageData {
    pub fees: Paginated<SubscriptionFee>,
    pub accounts: Vec<Account>,
    pub badges: Vec<FilterBadge>,
    pub sort_links: Vec<SortLink>,
    pub pager: Vec<PageLink>,
    pub filters: FeeFilterEcho,
    pub reset_href: String,
}

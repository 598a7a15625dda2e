//! Page data for the loan screens.

use serde::Serialize;

use crate::domain::loan::{Installment, Loan, LoanType, ScheduleTotals};
use crate::dto::{PageLink, SortLink};
use crate::listing::{FilterBadge, Paginated};

/// Values echoed back into the filter form inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoanFilterEcho {
    pub search: Option<String>,
    pub status: Option<String>,
    pub loan_type: Option<String>,
}

/// Data required to render the loans listing template.
#[derive(Serialize)]
pub struct LoansPageData {
    pub loans: Paginated<Loan>,
    /// Lookup dataset backing the `loan_type` filter selector and badges.
    pub loan_types: Vec<LoanType>,
    pub badges: Vec<FilterBadge>,
    pub sort_links: Vec<SortLink>,
    pub pager: Vec<PageLink>,
    pub filters: LoanFilterEcho,
    /// Target of the "clear filters" link.
    pub reset_href: String,
}

/// Data required to render a single loan's detail template.
#[derive(Serialize)]
pub struct LoanPageData {
    pub loan: Loan,
    pub loan_type_name: String,
    pub schedule: Vec<Installment>,
    pub totals: ScheduleTotals,
}

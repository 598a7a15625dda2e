use validator::Validate;

use crate::domain::loan::{Loan, LoanStatus, ScheduleTotals};
use crate::domain::types::{LoanId, LoanTypeId};
use crate::dto::loans::{LoanFilterEcho, LoanPageData, LoansPageData};
use crate::dto::{pager_links, sort_links};
use crate::listing::{FilterState, PageMeta, Paginated, QueryState, TableState, filters};
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{LoanListQuery, LoanReader, LoanWriter};
use crate::services::{ServiceError, ServiceResult, check_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const LOANS_PATH: &str = "/loans";

/// Columns the loans table can be ordered by, with their header labels.
const SORTABLE_COLUMNS: &[(&str, &str)] = &[
    ("borrower", "Borrower"),
    ("amount", "Amount"),
    ("created_at", "Created"),
];

/// Loads the loans listing for the current query string.
///
/// The query string is the single source of truth: sort, page and filters are
/// all decoded from it, pushed down into the repository query, and encoded
/// back into the header/pager hrefs.
pub fn load_loans_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    raw_query: &str,
) -> ServiceResult<LoansPageData>
where
    R: LoanReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let query = QueryState::parse(raw_query);
    let table = TableState::from_query(&query);
    let filter_state = FilterState::from_query(&query);

    let mut list_query = LoanListQuery::new().table_state(&table);
    if let Some(term) = filter_state.get("search") {
        list_query = list_query.search(term);
    }
    if let Some(status) = filter_state
        .get("status")
        .and_then(|s| s.parse::<LoanStatus>().ok())
    {
        list_query = list_query.status(status);
    }
    if let Some(loan_type) = filter_state
        .get("loan_type")
        .and_then(|v| v.parse::<i32>().ok())
        .and_then(|id| LoanTypeId::new(id).ok())
    {
        list_query = list_query.loan_type(loan_type);
    }

    let (total, loans) = repo.list_loans(list_query)?;
    let loan_types = repo.list_loan_types()?;

    let badges = filters::active_badges(&filter_state, |key, value| match key {
        "search" => Some(format!("Search: {value}")),
        "status" => Some(format!("Status: {value}")),
        "loan_type" => {
            let wanted = value.parse::<i32>().ok()?;
            let label = filters::lookup_label(
                Some(loan_types.as_slice()),
                |t| t.id == wanted,
                |t| t.name.clone(),
            );
            Some(format!("Type: {label}"))
        }
        _ => None,
    });

    let echo = LoanFilterEcho {
        search: filter_state.get("search").map(str::to_string),
        status: filter_state.get("status").map(str::to_string),
        loan_type: filter_state.get("loan_type").map(str::to_string),
    };

    let mut cleared = query.clone();
    cleared.reset();

    let meta = PageMeta::from_total(total, table.page(), table.page_size());
    let loans = Paginated::new(loans, table.page(), meta);
    let pager = pager_links(LOANS_PATH, &query, &loans.pages, table.page());

    Ok(LoansPageData {
        loans,
        loan_types,
        badges,
        sort_links: sort_links(LOANS_PATH, &query, &table, SORTABLE_COLUMNS),
        pager,
        filters: echo,
        reset_href: cleared.target(LOANS_PATH),
    })
}

/// Applies a submitted filter form and returns the navigation target.
pub fn apply_loan_filters(
    user: &AuthenticatedUser,
    form: &crate::forms::loans::LoanFilterForm,
    raw_query: &str,
) -> ServiceResult<String> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    form.validate().map_err(|e| {
        log::error!("Failed to validate loan filter form: {e}");
        ServiceError::Form("Invalid filter values".to_string())
    })?;

    let mut query = QueryState::parse(raw_query);
    query.set_params(form.to_params());
    Ok(query.target(LOANS_PATH))
}

/// Changes a loan's lifecycle status. Restricted to service administrators.
pub fn set_loan_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: LoanId,
    status: LoanStatus,
) -> ServiceResult<Loan>
where
    R: LoanWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.update_loan_status(id, status).map_err(|e| match e {
        RepositoryError::NotFound => ServiceError::NotFound,
        other => other.into(),
    })
}

/// Loads a single loan with its repayment schedule.
pub fn load_loan_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: LoanId,
) -> ServiceResult<LoanPageData>
where
    R: LoanReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let loan = repo.get_loan_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let schedule = repo.list_installments(id)?;
    let totals = ScheduleTotals::from_installments(&schedule);

    let loan_types = repo.list_loan_types()?;
    let loan_type_name = filters::lookup_label(
        Some(loan_types.as_slice()),
        |t| t.id == loan.loan_type_id,
        |t| t.name.clone(),
    );

    Ok(LoanPageData {
        loan,
        loan_type_name,
        schedule,
        totals,
    })
}

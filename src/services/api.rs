//! List endpoints of the JSON API, sharing the URL contract of the HTML
//! pages and returning `{data, meta}` envelopes.

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::loan::{Loan, LoanStatus};
use crate::domain::subscription_fee::{FeeStatus, SubscriptionFee};
use crate::domain::types::{AccountId, LoanTypeId};
use crate::dto::api::Envelope;
use crate::listing::{FilterState, PageMeta, QueryState, TableState};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{FeeListQuery, FeeReader, LoanListQuery, LoanReader};
use crate::services::{ServiceError, ServiceResult, check_role};

/// Returns one page of loans for `/api/v1/loans`.
pub fn list_loans<R>(
    repo: &R,
    user: &AuthenticatedUser,
    raw_query: &str,
) -> ServiceResult<Envelope<Loan>>
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
    let meta = PageMeta::from_total(total, table.page(), table.page_size());

    Ok(Envelope::new(loans, &table, meta))
}

/// Returns one page of subscription fees for `/api/v1/fees`.
pub fn list_fees<R>(
    repo: &R,
    user: &AuthenticatedUser,
    raw_query: &str,
) -> ServiceResult<Envelope<SubscriptionFee>>
where
    R: FeeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let query = QueryState::parse(raw_query);
    let table = TableState::from_query(&query);
    let filter_state = FilterState::from_query(&query);

    let mut list_query = FeeListQuery::new().table_state(&table);
    if let Some(term) = filter_state.get("search") {
        list_query = list_query.search(term);
    }
    if let Some(account) = filter_state
        .get("account")
        .and_then(|v| v.parse::<i32>().ok())
        .and_then(|id| AccountId::new(id).ok())
    {
        list_query = list_query.account(account);
    }
    if let Some(status) = filter_state
        .get("status")
        .and_then(|v| v.parse::<FeeStatus>().ok())
    {
        list_query = list_query.status(status);
    }

    let (total, fees) = repo.list_fees(list_query)?;
    let meta = PageMeta::from_total(total, table.page(), table.page_size());

    Ok(Envelope::new(fees, &table, meta))
}

use validator::Validate;

use crate::domain::subscription_fee::{FeeStatus, SubscriptionFee};
use crate::domain::types::{AccountId, FeeId};
use crate::dto::fees::{FeeFilterEcho, FeesPageData};
use crate::dto::{pager_links, sort_links};
use crate::forms::fees::FeeFilterForm;
use crate::listing::{FilterState, PageMeta, Paginated, QueryState, TableState, filters};
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{AccountReader, FeeListQuery, FeeReader, FeeWriter};
use crate::services::{ServiceError, ServiceResult, check_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const FEES_PATH: &str = "/fees";

const SORTABLE_COLUMNS: &[(&str, &str)] = &[
    ("period", "Period"),
    ("amount", "Amount"),
    ("due_date", "Due date"),
];

/// Loads the subscription fees listing for the current query string.
pub fn load_fees_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    raw_query: &str,
) -> ServiceResult<FeesPageData>
where
    R: FeeReader + AccountReader + ?Sized,
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
    let accounts = repo.list_accounts()?;

    let badges = filters::active_badges(&filter_state, |key, value| match key {
        "search" => Some(format!("Search: {value}")),
        "status" => Some(format!("Status: {value}")),
        "account" => {
            let wanted = value.parse::<i32>().ok()?;
            let label = filters::lookup_label(
                Some(accounts.as_slice()),
                |a| a.id == wanted,
                |a| a.owner.clone(),
            );
            Some(format!("Account: {label}"))
        }
        _ => None,
    });

    let echo = FeeFilterEcho {
        search: filter_state.get("search").map(str::to_string),
        account: filter_state.get("account").map(str::to_string),
        status: filter_state.get("status").map(str::to_string),
    };

    let mut cleared = query.clone();
    cleared.reset();

    let meta = PageMeta::from_total(total, table.page(), table.page_size());
    let fees = Paginated::new(fees, table.page(), meta);
    let pager = pager_links(FEES_PATH, &query, &fees.pages, table.page());

    Ok(FeesPageData {
        fees,
        accounts,
        badges,
        sort_links: sort_links(FEES_PATH, &query, &table, SORTABLE_COLUMNS),
        pager,
        filters: echo,
        reset_href: cleared.target(FEES_PATH),
    })
}

/// Applies a submitted filter form and returns the navigation target.
pub fn apply_fee_filters(
    user: &AuthenticatedUser,
    form: &FeeFilterForm,
    raw_query: &str,
) -> ServiceResult<String> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    form.validate().map_err(|e| {
        log::error!("Failed to validate fee filter form: {e}");
        ServiceError::Form("Invalid filter values".to_string())
    })?;

    let mut query = QueryState::parse(raw_query);
    query.set_params(form.to_params());
    Ok(query.target(FEES_PATH))
}

/// Marks a fee as paid. Settling money owed is an admin operation.
pub fn settle_fee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: FeeId,
) -> ServiceResult<SubscriptionFee>
where
    R: FeeWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.mark_fee_paid(id).map_err(|e| match e {
        RepositoryError::NotFound => ServiceError::NotFound,
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            email: "teller@example.com".to_string(),
            name: "Teller".to_string(),
            roles: vec!["fin".to_string()],
        }
    }

    #[test]
    fn status_filter_is_pushed_down() {
        let mut repo = MockRepository::new();
        repo.expect_list_fees()
            .withf(|q: &FeeListQuery| {
                q.status == Some(FeeStatus::Due) && q.search.as_deref() == Some("ali")
            })
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_accounts().returning(|| Ok(Vec::new()));

        let page = load_fees_page(&repo, &user(), "status=DUE&search=ali").unwrap();
        assert_eq!(page.badges.len(), 2);
    }

    #[test]
    fn reset_href_is_bare_path() {
        let mut repo = MockRepository::new();
        repo.expect_list_fees().returning(|_| Ok((0, Vec::new())));
        repo.expect_list_accounts().returning(|| Ok(Vec::new()));

        let page = load_fees_page(&repo, &user(), "page=4&status=DUE&search=ali").unwrap();
        assert_eq!(page.reset_href, "/fees");
    }

    #[test]
    fn settling_a_fee_requires_admin_role() {
        let repo = MockRepository::new();
        // Listing access alone is not enough to settle money owed.
        let result = settle_fee(&repo, &user(), FeeId::new(1).unwrap());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_marks_fee_paid() {
        use chrono::NaiveDate;

        let mut repo = MockRepository::new();
        repo.expect_mark_fee_paid()
            .withf(|id: &FeeId| id.get() == 7)
            .returning(|id| {
                Ok(SubscriptionFee {
                    id: id.get(),
                    account_id: 1,
                    period: "2026-02".to_string(),
                    amount_cents: 990,
                    status: FeeStatus::Paid,
                    due_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
                })
            });

        let mut admin = user();
        admin.roles.push("fin_admin".to_string());
        let fee = settle_fee(&repo, &admin, FeeId::new(7).unwrap()).unwrap();
        assert_eq!(fee.status, FeeStatus::Paid);
    }
}

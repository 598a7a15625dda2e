use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::transaction::EntryKind;
use crate::domain::types::AccountId;
use crate::dto::transactions::{TransactionFilterEcho, TransactionsPageData};
use crate::dto::{pager_links, sort_links};
use crate::forms::transactions::TransactionFilterForm;
use crate::listing::{FilterState, PageMeta, Paginated, QueryState, TableState, filters};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AccountReader, TransactionListQuery, TransactionReader};
use crate::services::{ServiceError, ServiceResult, check_role};

pub const TRANSACTIONS_PATH: &str = "/transactions";

const SORTABLE_COLUMNS: &[(&str, &str)] = &[("amount", "Amount"), ("booked_at", "Booked")];

/// Loads the transactions listing for the current query string.
pub fn load_transactions_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    raw_query: &str,
) -> ServiceResult<TransactionsPageData>
where
    R: TransactionReader + AccountReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let query = QueryState::parse(raw_query);
    let table = TableState::from_query(&query);
    let filter_state = FilterState::from_query(&query);

    let mut list_query = TransactionListQuery::new().table_state(&table);
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
    if let Some(entry) = filter_state
        .get("entry")
        .and_then(|v| v.parse::<EntryKind>().ok())
    {
        list_query = list_query.entry(entry);
    }

    let (total, transactions) = repo.list_transactions(list_query)?;
    let accounts = repo.list_accounts()?;

    let badges = filters::active_badges(&filter_state, |key, value| match key {
        "search" => Some(format!("Search: {value}")),
        "entry" => Some(format!("Entry: {value}")),
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

    let echo = TransactionFilterEcho {
        search: filter_state.get("search").map(str::to_string),
        account: filter_state.get("account").map(str::to_string),
        entry: filter_state.get("entry").map(str::to_string),
    };

    let mut cleared = query.clone();
    cleared.reset();

    let meta = PageMeta::from_total(total, table.page(), table.page_size());
    let transactions = Paginated::new(transactions, table.page(), meta);
    let pager = pager_links(TRANSACTIONS_PATH, &query, &transactions.pages, table.page());

    Ok(TransactionsPageData {
        transactions,
        accounts,
        badges,
        sort_links: sort_links(TRANSACTIONS_PATH, &query, &table, SORTABLE_COLUMNS),
        pager,
        filters: echo,
        reset_href: cleared.target(TRANSACTIONS_PATH),
    })
}

/// Applies a submitted filter form and returns the navigation target.
pub fn apply_transaction_filters(
    user: &AuthenticatedUser,
    form: &TransactionFilterForm,
    raw_query: &str,
) -> ServiceResult<String> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    form.validate().map_err(|e| {
        log::error!("Failed to validate transaction filter form: {e}");
        ServiceError::Form("Invalid filter values".to_string())
    })?;

    let mut query = QueryState::parse(raw_query);
    query.set_params(form.to_params());
    Ok(query.target(TRANSACTIONS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Account;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            email: "teller@example.com".to_string(),
            name: "Teller".to_string(),
            roles: vec!["fin".to_string()],
        }
    }

    #[test]
    fn account_badge_shows_placeholder_for_unknown_id() {
        let mut repo = MockRepository::new();
        repo.expect_list_transactions()
            .returning(|_| Ok((0, Vec::new())));
        // The account referenced by the filter is not in the lookup yet.
        repo.expect_list_accounts().returning(|| Ok(Vec::new()));

        let page = load_transactions_page(&repo, &user(), "account=42").unwrap();
        assert_eq!(page.badges.len(), 1);
        assert_eq!(page.badges[0].text, "Account: …");
    }

    #[test]
    fn entry_filter_is_pushed_down() {
        let mut repo = MockRepository::new();
        repo.expect_list_transactions()
            .withf(|q: &TransactionListQuery| q.entry == Some(EntryKind::Credit))
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_accounts().returning(|| {
            Ok(vec![Account {
                id: 1,
                owner: "Alima".to_string(),
                number: "ACC-001".to_string(),
            }])
        });

        let page = load_transactions_page(&repo, &user(), "entry=CREDIT").unwrap();
        assert_eq!(page.badges[0].text, "Entry: CREDIT");
    }

    #[test]
    fn malformed_account_filter_is_ignored() {
        let mut repo = MockRepository::new();
        repo.expect_list_transactions()
            .withf(|q: &TransactionListQuery| q.account.is_none())
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_accounts().returning(|| Ok(Vec::new()));

        let page = load_transactions_page(&repo, &user(), "account=abc").unwrap();
        // Unparseable ids produce no badge either.
        assert!(page.badges.is_empty());
    }
}

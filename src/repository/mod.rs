//! Repository traits and list-query builders.
//!
//! List queries carry everything the URL contract encodes — free-text search,
//! field filters, a single-column sort and a pagination window — so that
//! filtering, ordering and slicing all happen in SQL. Handlers never reorder
//! or re-slice the rows a repository returns.

use crate::db::DbPool;
use crate::domain::account::{Account, NewAccount};
use crate::domain::loan::{Installment, Loan, LoanStatus, LoanType, NewInstallment, NewLoan};
use crate::domain::subscription_fee::{FeeStatus, NewSubscriptionFee, SubscriptionFee};
use crate::domain::transaction::{EntryKind, NewTransaction, Transaction};
use crate::domain::types::{AccountId, FeeId, LoanId, LoanTypeId};
use crate::listing::pagination::{MAX_PAGE, MAX_PAGE_SIZE};
use crate::listing::{SortSpec, TableState};
use crate::repository::errors::RepositoryResult;

pub mod account;
pub mod errors;
pub mod loan;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod subscription_fee;
pub mod transaction;

/// Page window requested by the caller (1-based page).
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

macro_rules! listing_builder_methods {
    () => {
        pub fn search(mut self, term: impl Into<String>) -> Self {
            self.search = Some(term.into());
            self
        }

        pub fn sort(mut self, sort: SortSpec) -> Self {
            self.sort = Some(sort);
            self
        }

        pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
            self.pagination = Some(Pagination { page, per_page });
            self
        }

        /// Adopts the sort and pagination decoded from the URL.
        pub fn table_state(mut self, state: &TableState) -> Self {
            self.sort = state.primary_sort().cloned();
            self.pagination = Some(Pagination {
                page: state.page(),
                per_page: state.page_size(),
            });
            self
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct LoanListQuery {
    pub search: Option<String>,
    pub status: Option<LoanStatus>,
    pub loan_type: Option<LoanTypeId>,
    pub sort: Option<SortSpec>,
    pub pagination: Option<Pagination>,
}

impl LoanListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: LoanStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn loan_type(mut self, loan_type: LoanTypeId) -> Self {
        self.loan_type = Some(loan_type);
        self
    }

    listing_builder_methods!();
}

#[derive(Debug, Clone, Default)]
pub struct TransactionListQuery {
    pub search: Option<String>,
    pub account: Option<AccountId>,
    pub entry: Option<EntryKind>,
    pub sort: Option<SortSpec>,
    pub pagination: Option<Pagination>,
}

impl TransactionListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    pub fn entry(mut self, entry: EntryKind) -> Self {
        self.entry = Some(entry);
        self
    }

    listing_builder_methods!();
}

#[derive(Debug, Clone, Default)]
pub struct FeeListQuery {
    /// Matched against the owning account's name.
    pub search: Option<String>,
    pub account: Option<AccountId>,
    pub status: Option<FeeStatus>,
    pub sort: Option<SortSpec>,
    pub pagination: Option<Pagination>,
}

impl FeeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    pub fn status(mut self, status: FeeStatus) -> Self {
        self.status = Some(status);
        self
    }

    listing_builder_methods!();
}

pub trait LoanReader {
    fn get_loan_by_id(&self, id: LoanId) -> RepositoryResult<Option<Loan>>;
    fn list_loans(&self, query: LoanListQuery) -> RepositoryResult<(usize, Vec<Loan>)>;
    fn list_loan_types(&self) -> RepositoryResult<Vec<LoanType>>;
    fn list_installments(&self, loan_id: LoanId) -> RepositoryResult<Vec<Installment>>;
}

pub trait LoanWriter {
    fn create_loans(&self, new_loans: &[NewLoan]) -> RepositoryResult<usize>;
    fn create_loan_type(&self, name: &str) -> RepositoryResult<LoanType>;
    fn create_installments(&self, new_installments: &[NewInstallment]) -> RepositoryResult<usize>;
    fn update_loan_status(&self, id: LoanId, status: LoanStatus) -> RepositoryResult<Loan>;
}

pub trait AccountReader {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
    fn list_accounts(&self) -> RepositoryResult<Vec<Account>>;
}

pub trait AccountWriter {
    fn create_accounts(&self, new_accounts: &[NewAccount]) -> RepositoryResult<usize>;
}

pub trait TransactionReader {
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<Transaction>)>;
}

pub trait TransactionWriter {
    fn create_transactions(&self, new_transactions: &[NewTransaction]) -> RepositoryResult<usize>;
}

pub trait FeeReader {
    fn list_fees(&self, query: FeeListQuery) -> RepositoryResult<(usize, Vec<SubscriptionFee>)>;
}

pub trait FeeWriter {
    fn create_fees(&self, new_fees: &[NewSubscriptionFee]) -> RepositoryResult<usize>;
    fn mark_fee_paid(&self, id: FeeId) -> RepositoryResult<SubscriptionFee>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(
        &self,
    ) -> Result<
        diesel::r2d2::PooledConnection<
            diesel::r2d2::ConnectionManager<diesel::sqlite::SqliteConnection>,
        >,
        errors::RepositoryError,
    > {
        self.pool.get().map_err(Into::into)
    }
}

/// Converts a 1-based pagination window to SQL limit/offset.
///
/// Both values are clamped to the listing bounds first; callers can hand in
/// windows that never went through `TableState::from_query`.
pub(crate) fn limit_offset(pagination: &Pagination) -> (i64, i64) {
    let page = pagination.page.clamp(1, MAX_PAGE) as i64;
    let per_page = pagination.per_page.clamp(1, MAX_PAGE_SIZE) as i64;
    (per_page, (page - 1) * per_page)
}

//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::account::{Account, NewAccount};
use crate::domain::loan::{Installment, Loan, LoanStatus, LoanType, NewInstallment, NewLoan};
use crate::domain::subscription_fee::{NewSubscriptionFee, SubscriptionFee};
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::domain::types::{AccountId, FeeId, LoanId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountReader, AccountWriter, FeeListQuery, FeeReader, FeeWriter, LoanListQuery, LoanReader,
    LoanWriter, TransactionListQuery, TransactionReader, TransactionWriter,
};

mock! {
    pub Repository {}

    impl LoanReader for Repository {
        fn get_loan_by_id(&self, id: LoanId) -> RepositoryResult<Option<Loan>>;
        fn list_loans(&self, query: LoanListQuery) -> RepositoryResult<(usize, Vec<Loan>)>;
        fn list_loan_types(&self) -> RepositoryResult<Vec<LoanType>>;
        fn list_installments(&self, loan_id: LoanId) -> RepositoryResult<Vec<Installment>>;
    }

    impl LoanWriter for Repository {
        fn create_loans(&self, new_loans: &[NewLoan]) -> RepositoryResult<usize>;
        fn create_loan_type(&self, name: &str) -> RepositoryResult<LoanType>;
        fn create_installments(
            &self,
            new_installments: &[NewInstallment],
        ) -> RepositoryResult<usize>;
        fn update_loan_status(&self, id: LoanId, status: LoanStatus) -> RepositoryResult<Loan>;
    }

    impl AccountReader for Repository {
        fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
        fn list_accounts(&self) -> RepositoryResult<Vec<Account>>;
    }

    impl AccountWriter for Repository {
        fn create_accounts(&self, new_accounts: &[NewAccount]) -> RepositoryResult<usize>;
    }

    impl TransactionReader for Repository {
        fn list_transactions(
            &self,
            query: TransactionListQuery,
        ) -> RepositoryResult<(usize, Vec<Transaction>)>;
    }

    impl TransactionWriter for Repository {
        fn create_transactions(
            &self,
            new_transactions: &[NewTransaction],
        ) -> RepositoryResult<usize>;
    }

    impl FeeReader for Repository {
        fn list_fees(&self, query: FeeListQuery) -> RepositoryResult<(usize, Vec<SubscriptionFee>)>;
    }

    impl FeeWriter for Repository {
        fn create_fees(&self, new_fees: &[NewSubscriptionFee]) -> RepositoryResult<usize>;
        fn mark_fee_paid(&self, id: FeeId) -> RepositoryResult<SubscriptionFee>;
    }
}

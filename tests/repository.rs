use chrono::NaiveDate;

use finadmin::domain::account::NewAccount;
use finadmin::domain::loan::{InstallmentStatus, LoanStatus, NewInstallment, NewLoan};
use finadmin::domain::subscription_fee::{FeeStatus, NewSubscriptionFee};
use finadmin::domain::transaction::{EntryKind, NewTransaction};
use finadmin::domain::types::{AccountId, FeeId, LoanId, LoanTypeId};
use finadmin::listing::{QueryState, SortSpec, TableState};
use finadmin::repository::{
    AccountReader, AccountWriter, DieselRepository, FeeListQuery, FeeReader, FeeWriter,
    LoanListQuery, LoanReader, LoanWriter, TransactionListQuery, TransactionReader,
    TransactionWriter,
};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_loan_repository_filters_sorts_and_paginates() {
    let test_db = common::TestDb::new("test_loan_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let mortgage = repo.create_loan_type("Mortgage").unwrap();
    let auto = repo.create_loan_type("Auto").unwrap();

    let loans = vec![
        NewLoan::new("Alice".into(), 500_000, LoanStatus::Active, mortgage.id),
        NewLoan::new("Alina".into(), 200_000, LoanStatus::Active, auto.id),
        NewLoan::new("Bob".into(), 900_000, LoanStatus::Defaulted, mortgage.id),
        NewLoan::new("Carol".into(), 100_000, LoanStatus::Closed, auto.id),
    ];
    assert_eq!(repo.create_loans(&loans).unwrap(), 4);

    // Unfiltered list, default id order.
    let (total, items) = repo.list_loans(LoanListQuery::new()).unwrap();
    assert_eq!(total, 4);
    assert_eq!(items[0].borrower, "Alice");

    // Substring search on the borrower.
    let (total, items) = repo
        .list_loans(LoanListQuery::new().search("Ali"))
        .unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|l| l.borrower.starts_with("Ali")));

    // Status and type filters compose.
    let (total, items) = repo
        .list_loans(
            LoanListQuery::new()
                .status(LoanStatus::Active)
                .loan_type(LoanTypeId::new(auto.id).unwrap()),
        )
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].borrower, "Alina");

    // Sort by amount descending.
    let (_, items) = repo
        .list_loans(LoanListQuery::new().sort(SortSpec::desc("amount")))
        .unwrap();
    assert_eq!(items[0].borrower, "Bob");
    assert_eq!(items[3].borrower, "Carol");

    // Unknown sort columns fall back to id order instead of failing.
    let (_, items) = repo
        .list_loans(LoanListQuery::new().sort(SortSpec::asc("nonsense")))
        .unwrap();
    assert_eq!(items[0].borrower, "Alice");

    // Pagination slices after filtering and sorting; total counts all matches.
    let (total, page2) = repo
        .list_loans(
            LoanListQuery::new()
                .sort(SortSpec::asc("borrower"))
                .paginate(2, 3),
        )
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(page2.len(), 1);
    assert_eq!(page2[0].borrower, "Carol");

    let types = repo.list_loan_types().unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].name, "Auto");

    // A crafted URL can carry an absurd page number; the window clamps and
    // yields an empty page instead of overflowing the offset math.
    let url = "page=5000000000000000000&per_page=18446744073709551615";
    let state = TableState::from_query(&QueryState::parse(url));
    let (total, far_out) = repo
        .list_loans(LoanListQuery::new().table_state(&state))
        .unwrap();
    assert_eq!(total, 4);
    assert!(far_out.is_empty());
}

#[test]
fn test_loan_status_update_and_schedule() {
    let test_db = common::TestDb::new("test_loan_status_update.db");
    let repo = DieselRepository::new(test_db.pool());

    let loan_type = repo.create_loan_type("Mortgage").unwrap();
    repo.create_loans(&[NewLoan::new(
        "Alice".into(),
        120_000,
        LoanStatus::Active,
        loan_type.id,
    )])
    .unwrap();
    let (_, loans) = repo.list_loans(LoanListQuery::new()).unwrap();
    let loan = &loans[0];

    let schedule = vec![
        NewInstallment {
            loan_id: loan.id,
            seq: 1,
            amount_cents: 60_000,
            status: InstallmentStatus::Paid,
            due_date: date(2026, 1, 31),
        },
        NewInstallment {
            loan_id: loan.id,
            seq: 2,
            amount_cents: 60_000,
            status: InstallmentStatus::Due,
            due_date: date(2026, 2, 28),
        },
    ];
    assert_eq!(repo.create_installments(&schedule).unwrap(), 2);

    let loan_id = LoanId::new(loan.id).unwrap();
    let installments = repo.list_installments(loan_id).unwrap();
    assert_eq!(installments.len(), 2);
    assert_eq!(installments[0].seq, 1);
    assert_eq!(installments[0].status, InstallmentStatus::Paid);

    let updated = repo.update_loan_status(loan_id, LoanStatus::Closed).unwrap();
    assert_eq!(updated.status, LoanStatus::Closed);

    let fetched = repo.get_loan_by_id(loan_id).unwrap().unwrap();
    assert_eq!(fetched.status, LoanStatus::Closed);

    assert!(repo.get_loan_by_id(LoanId::new(999).unwrap()).unwrap().is_none());
}

#[test]
fn test_transaction_repository_filters_and_sorts() {
    let test_db = common::TestDb::new("test_transaction_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_accounts(&[
        NewAccount::new("Alice".into(), "ACC-1".into()),
        NewAccount::new("Bob".into(), "ACC-2".into()),
    ])
    .unwrap();
    let accounts = repo.list_accounts().unwrap();
    let alice = &accounts[0];
    let bob = &accounts[1];

    repo.create_transactions(&[
        NewTransaction::new(alice.id, 1_000, EntryKind::Debit, "Card payment".into()),
        NewTransaction::new(alice.id, 5_000, EntryKind::Credit, "Salary".into()),
        NewTransaction::new(bob.id, 2_500, EntryKind::Debit, "Transfer out".into()),
    ])
    .unwrap();

    let (total, _) = repo
        .list_transactions(TransactionListQuery::new())
        .unwrap();
    assert_eq!(total, 3);

    // Account filter plus entry filter.
    let (total, items) = repo
        .list_transactions(
            TransactionListQuery::new()
                .account(AccountId::new(alice.id).unwrap())
                .entry(EntryKind::Credit),
        )
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].description, "Salary");

    // Description search.
    let (total, items) = repo
        .list_transactions(TransactionListQuery::new().search("transfer"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].amount_cents, 2_500);

    // Explicit amount sort overrides the booked_at default.
    let (_, items) = repo
        .list_transactions(TransactionListQuery::new().sort(SortSpec::asc("amount")))
        .unwrap();
    assert_eq!(items[0].amount_cents, 1_000);
    assert_eq!(items[2].amount_cents, 5_000);

    let fetched = repo
        .get_account_by_id(AccountId::new(bob.id).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(fetched.number, "ACC-2");
}

#[test]
fn test_fee_repository_owner_search_and_mark_paid() {
    let test_db = common::TestDb::new("test_fee_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_accounts(&[
        NewAccount::new("Alice".into(), "ACC-1".into()),
        NewAccount::new("Bob".into(), "ACC-2".into()),
    ])
    .unwrap();
    let accounts = repo.list_accounts().unwrap();
    let alice = &accounts[0];
    let bob = &accounts[1];

    repo.create_fees(&[
        NewSubscriptionFee {
            account_id: alice.id,
            period: "2026-01".into(),
            amount_cents: 990,
            status: FeeStatus::Paid,
            due_date: date(2026, 1, 15),
        },
        NewSubscriptionFee {
            account_id: alice.id,
            period: "2026-02".into(),
            amount_cents: 990,
            status: FeeStatus::Due,
            due_date: date(2026, 2, 15),
        },
        NewSubscriptionFee {
            account_id: bob.id,
            period: "2026-02".into(),
            amount_cents: 1_490,
            status: FeeStatus::Due,
            due_date: date(2026, 2, 15),
        },
    ])
    .unwrap();

    // Search goes through the account join and matches the owner name.
    let (total, items) = repo.list_fees(FeeListQuery::new().search("ali")).unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|f| f.account_id == alice.id));

    let (total, items) = repo
        .list_fees(FeeListQuery::new().status(FeeStatus::Due).sort(SortSpec::desc("amount")))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].amount_cents, 1_490);

    let due_fee = items
        .iter()
        .find(|f| f.account_id == alice.id)
        .unwrap();
    let paid = repo.mark_fee_paid(FeeId::new(due_fee.id).unwrap()).unwrap();
    assert_eq!(paid.status, FeeStatus::Paid);

    let (total, _) = repo
        .list_fees(FeeListQuery::new().status(FeeStatus::Due))
        .unwrap();
    assert_eq!(total, 1);
}

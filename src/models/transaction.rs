use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::{
    NewTransaction as DomainNewTransaction, Transaction as DomainTransaction,
};
use crate::domain::types::TypeConstraintError;
use crate::models::account::Account;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(Account, foreign_key = account_id))]
/// Diesel model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub amount_cents: i64,
    pub entry: String,
    pub description: String,
    pub booked_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub account_id: i32,
    pub amount_cents: i64,
    pub entry: &'a str,
    pub description: &'a str,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tx.id,
            account_id: tx.account_id,
            amount_cents: tx.amount_cents,
            entry: tx.entry.parse()?,
            description: tx.description,
            booked_at: tx.booked_at,
        })
    }
}

impl<'a> From<&'a DomainNewTransaction> for NewTransaction<'a> {
    fn from(tx: &'a DomainNewTransaction) -> Self {
        Self {
            account_id: tx.account_id,
            amount_cents: tx.amount_cents,
            entry: tx.entry.as_str(),
            description: tx.description.as_str(),
        }
    }
}

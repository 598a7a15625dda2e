use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::subscription_fee::{
    NewSubscriptionFee as DomainNewSubscriptionFee, SubscriptionFee as DomainSubscriptionFee,
};
use crate::domain::types::TypeConstraintError;
use crate::models::account::Account;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::subscription_fees)]
#[diesel(belongs_to(Account, foreign_key = account_id))]
/// Diesel model for [`crate::domain::subscription_fee::SubscriptionFee`].
pub struct SubscriptionFee {
    pub id: i32,
    pub account_id: i32,
    pub period: String,
    pub amount_cents: i64,
    pub status: String,
    pub due_date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subscription_fees)]
pub struct NewSubscriptionFee<'a> {
    pub account_id: i32,
    pub period: &'a str,
    pub amount_cents: i64,
    pub status: &'a str,
    pub due_date: NaiveDate,
}

impl TryFrom<SubscriptionFee> for DomainSubscriptionFee {
    type Error = TypeConstraintError;

    fn try_from(fee: SubscriptionFee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: fee.id,
            account_id: fee.account_id,
            period: fee.period,
            amount_cents: fee.amount_cents,
            status: fee.status.parse()?,
            due_date: fee.due_date,
        })
    }
}

impl<'a> From<&'a DomainNewSubscriptionFee> for NewSubscriptionFee<'a> {
    fn from(fee: &'a DomainNewSubscriptionFee) -> Self {
        Self {
            account_id: fee.account_id,
            period: fee.period.as_str(),
            amount_cents: fee.amount_cents,
            status: fee.status.as_str(),
            due_date: fee.due_date,
        }
    }
}

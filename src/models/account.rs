use diesel::prelude::*;

use crate::domain::account::{Account as DomainAccount, NewAccount as DomainNewAccount};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::accounts)]
/// Diesel model for [`crate::domain::account::Account`].
pub struct Account {
    pub id: i32,
    pub owner: String,
    pub number: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount<'a> {
    pub owner: &'a str,
    pub number: &'a str,
}

impl From<Account> for DomainAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner: account.owner,
            number: account.number,
        }
    }
}

impl<'a> From<&'a DomainNewAccount> for NewAccount<'a> {
    fn from(account: &'a DomainNewAccount) -> Self {
        Self {
            owner: account.owner.as_str(),
            number: account.number.as_str(),
        }
    }
}

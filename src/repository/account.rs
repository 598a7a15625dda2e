use diesel::prelude::*;

use crate::domain::account::{Account, NewAccount};
use crate::domain::types::AccountId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{AccountReader, AccountWriter, DieselRepository};

impl AccountReader for DieselRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        use crate::models::account::Account as DbAccount;
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let account = accounts::table
            .find(id.get())
            .first::<DbAccount>(&mut conn)
            .optional()?;

        Ok(account.map(Into::into))
    }

    fn list_accounts(&self) -> RepositoryResult<Vec<Account>> {
        use crate::models::account::Account as DbAccount;
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let accounts = accounts::table
            .order(accounts::owner.asc())
            .load::<DbAccount>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(accounts)
    }
}

impl AccountWriter for DieselRepository {
    fn create_accounts(&self, new_accounts: &[NewAccount]) -> RepositoryResult<usize> {
        use crate::models::account::NewAccount as DbNewAccount;
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewAccount> = new_accounts.iter().map(Into::into).collect();
        let affected = diesel::insert_into(accounts::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}

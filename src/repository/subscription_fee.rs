use diesel::prelude::*;

use crate::domain::subscription_fee::{FeeStatus, NewSubscriptionFee, SubscriptionFee};
use crate::domain::types::FeeId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FeeListQuery, FeeReader, FeeWriter, limit_offset};

impl FeeReader for DieselRepository {
    fn list_fees(&self, query: FeeListQuery) -> RepositoryResult<(usize, Vec<SubscriptionFee>)> {
        use crate::models::subscription_fee::SubscriptionFee as DbFee;
        use crate::schema::{accounts, subscription_fees};

        let mut conn = self.conn()?;

        // Free-text search matches the owning account's name, so the fee
        // table is always joined to accounts.
        let mut items = subscription_fees::table
            .inner_join(accounts::table)
            .select(DbFee::as_select())
            .into_boxed();
        let mut count = subscription_fees::table
            .inner_join(accounts::table)
            .into_boxed();

        if let Some(term) = &query.search {
            let pattern = format!("%{term}%");
            items = items.filter(accounts::owner.like(pattern.clone()));
            count = count.filter(accounts::owner.like(pattern));
        }
        if let Some(account) = query.account {
            items = items.filter(subscription_fees::account_id.eq(account.get()));
            count = count.filter(subscription_fees::account_id.eq(account.get()));
        }
        if let Some(status) = query.status {
            items = items.filter(subscription_fees::status.eq(status.as_str()));
            count = count.filter(subscription_fees::status.eq(status.as_str()));
        }

        items = match &query.sort {
            Some(s) => match (s.column.as_str(), s.descending) {
                ("amount", false) => items.order(subscription_fees::amount_cents.asc()),
                ("amount", true) => items.order(subscription_fees::amount_cents.desc()),
                ("due_date", false) => items.order(subscription_fees::due_date.asc()),
                ("due_date", true) => items.order(subscription_fees::due_date.desc()),
                ("period", false) => items.order(subscription_fees::period.asc()),
                ("period", true) => items.order(subscription_fees::period.desc()),
                _ => items.order(subscription_fees::id.asc()),
            },
            None => items.order(subscription_fees::due_date.asc()),
        };

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = limit_offset(pagination);
            items = items.limit(limit).offset(offset);
        }

        let total: i64 = count.count().get_result(&mut conn)?;
        let fees = items
            .load::<DbFee>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubscriptionFee>, _>>()?;

        Ok((total as usize, fees))
    }
}

impl FeeWriter for DieselRepository {
    fn create_fees(&self, new_fees: &[NewSubscriptionFee]) -> RepositoryResult<usize> {
        use crate::models::subscription_fee::NewSubscriptionFee as DbNewFee;
        use crate::schema::subscription_fees;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewFee> = new_fees.iter().map(Into::into).collect();
        let affected = diesel::insert_into(subscription_fees::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn mark_fee_paid(&self, id: FeeId) -> RepositoryResult<SubscriptionFee> {
        use crate::models::subscription_fee::SubscriptionFee as DbFee;
        use crate::schema::subscription_fees;

        let mut conn = self.conn()?;
        let updated = diesel::update(subscription_fees::table.find(id.get()))
            .set(subscription_fees::status.eq(FeeStatus::Paid.as_str()))
            .get_result::<DbFee>(&mut conn)?;

        updated.try_into().map_err(Into::into)
    }
}

use diesel::prelude::*;

use crate::domain::transaction::{NewTransaction, Transaction};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, TransactionListQuery, TransactionReader, TransactionWriter, limit_offset,
};

impl TransactionReader for DieselRepository {
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<Transaction>)> {
        use crate::models::transaction::Transaction as DbTransaction;
        use crate::schema::transactions;

        let mut conn = self.conn()?;

        let mut items = transactions::table.into_boxed();
        let mut count = transactions::table.into_boxed();

        if let Some(term) = &query.search {
            let pattern = format!("%{term}%");
            items = items.filter(transactions::description.like(pattern.clone()));
            count = count.filter(transactions::description.like(pattern));
        }
        if let Some(account) = query.account {
            items = items.filter(transactions::account_id.eq(account.get()));
            count = count.filter(transactions::account_id.eq(account.get()));
        }
        if let Some(entry) = query.entry {
            items = items.filter(transactions::entry.eq(entry.as_str()));
            count = count.filter(transactions::entry.eq(entry.as_str()));
        }

        items = match &query.sort {
            Some(s) => match (s.column.as_str(), s.descending) {
                ("amount", false) => items.order(transactions::amount_cents.asc()),
                ("amount", true) => items.order(transactions::amount_cents.desc()),
                ("booked_at", false) => items.order(transactions::booked_at.asc()),
                ("booked_at", true) => items.order(transactions::booked_at.desc()),
                _ => items.order(transactions::id.asc()),
            },
            // Newest first is what the ledger screen expects by default.
            None => items.order(transactions::booked_at.desc()),
        };

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = limit_offset(pagination);
            items = items.limit(limit).offset(offset);
        }

        let total: i64 = count.count().get_result(&mut conn)?;
        let rows = items
            .load::<DbTransaction>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Transaction>, _>>()?;

        Ok((total as usize, rows))
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transactions(&self, new_transactions: &[NewTransaction]) -> RepositoryResult<usize> {
        use crate::models::transaction::NewTransaction as DbNewTransaction;
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewTransaction> =
            new_transactions.iter().map(Into::into).collect();
        let affected = diesel::insert_into(transactions::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}

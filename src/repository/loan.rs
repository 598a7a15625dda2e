use diesel::prelude::*;

use crate::domain::loan::{Installment, Loan, LoanStatus, LoanType, NewInstallment, NewLoan};
use crate::domain::types::LoanId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, LoanListQuery, LoanReader, LoanWriter, limit_offset};

impl LoanReader for DieselRepository {
    fn get_loan_by_id(&self, id: LoanId) -> RepositoryResult<Option<Loan>> {
        use crate::models::loan::Loan as DbLoan;
        use crate::schema::loans;

        let mut conn = self.conn()?;
        let loan = loans::table
            .find(id.get())
            .first::<DbLoan>(&mut conn)
            .optional()?;

        loan.map(TryInto::try_into).transpose().map_err(Into::into)
    }

    fn list_loans(&self, query: LoanListQuery) -> RepositoryResult<(usize, Vec<Loan>)> {
        use crate::models::loan::Loan as DbLoan;
        use crate::schema::loans;

        let mut conn = self.conn()?;

        let mut items = loans::table.into_boxed();
        let mut count = loans::table.into_boxed();

        if let Some(term) = &query.search {
            let pattern = format!("%{term}%");
            items = items.filter(loans::borrower.like(pattern.clone()));
            count = count.filter(loans::borrower.like(pattern));
        }
        if let Some(status) = query.status {
            items = items.filter(loans::status.eq(status.as_str()));
            count = count.filter(loans::status.eq(status.as_str()));
        }
        if let Some(loan_type) = query.loan_type {
            items = items.filter(loans::loan_type_id.eq(loan_type.get()));
            count = count.filter(loans::loan_type_id.eq(loan_type.get()));
        }

        // Sort columns are whitelisted; anything else falls back to id order.
        items = match &query.sort {
            Some(s) => match (s.column.as_str(), s.descending) {
                ("borrower", false) => items.order(loans::borrower.asc()),
                ("borrower", true) => items.order(loans::borrower.desc()),
                ("amount", false) => items.order(loans::amount_cents.asc()),
                ("amount", true) => items.order(loans::amount_cents.desc()),
                ("created_at", false) => items.order(loans::created_at.asc()),
                ("created_at", true) => items.order(loans::created_at.desc()),
                _ => items.order(loans::id.asc()),
            },
            None => items.order(loans::id.asc()),
        };

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = limit_offset(pagination);
            items = items.limit(limit).offset(offset);
        }

        let total: i64 = count.count().get_result(&mut conn)?;
        let loans = items
            .load::<DbLoan>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Loan>, _>>()?;

        Ok((total as usize, loans))
    }

    fn list_loan_types(&self) -> RepositoryResult<Vec<LoanType>> {
        use crate::models::loan::LoanType as DbLoanType;
        use crate::schema::loan_types;

        let mut conn = self.conn()?;
        let types = loan_types::table
            .order(loan_types::name.asc())
            .load::<DbLoanType>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(types)
    }

    fn list_installments(&self, loan_id: LoanId) -> RepositoryResult<Vec<Installment>> {
        use crate::models::loan::Installment as DbInstallment;
        use crate::schema::installments;

        let mut conn = self.conn()?;
        let schedule = installments::table
            .filter(installments::loan_id.eq(loan_id.get()))
            .order(installments::seq.asc())
            .load::<DbInstallment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Installment>, _>>()?;

        Ok(schedule)
    }
}

impl LoanWriter for DieselRepository {
    fn create_loans(&self, new_loans: &[NewLoan]) -> RepositoryResult<usize> {
        use crate::models::loan::NewLoan as DbNewLoan;
        use crate::schema::loans;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewLoan> = new_loans.iter().map(Into::into).collect();
        let affected = diesel::insert_into(loans::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_loan_type(&self, name: &str) -> RepositoryResult<LoanType> {
        use crate::models::loan::{LoanType as DbLoanType, NewLoanType};
        use crate::schema::loan_types;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(loan_types::table)
            .values(NewLoanType { name })
            .get_result::<DbLoanType>(&mut conn)?;

        Ok(created.into())
    }

    fn create_installments(&self, new_installments: &[NewInstallment]) -> RepositoryResult<usize> {
        use crate::models::loan::NewInstallment as DbNewInstallment;
        use crate::schema::installments;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewInstallment> =
            new_installments.iter().map(Into::into).collect();
        let affected = diesel::insert_into(installments::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_loan_status(&self, id: LoanId, status: LoanStatus) -> RepositoryResult<Loan> {
        use crate::models::loan::Loan as DbLoan;
        use crate::schema::loans;

        let mut conn = self.conn()?;
        let updated = diesel::update(loans::table.find(id.get()))
            .set(loans::status.eq(status.as_str()))
            .get_result::<DbLoan>(&mut conn)?;

        updated.try_into().map_err(Into::into)
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::loan::{
    Installment as DomainInstallment, Loan as DomainLoan, LoanType as DomainLoanType,
    NewInstallment as DomainNewInstallment, NewLoan as DomainNewLoan,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::loans)]
/// Diesel model for [`crate::domain::loan::Loan`].
pub struct Loan {
    pub id: i32,
    pub borrower: String,
    pub amount_cents: i64,
    pub status: String,
    pub loan_type_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::loans)]
/// Insertable form of [`Loan`].
pub struct NewLoan<'a> {
    pub borrower: &'a str,
    pub amount_cents: i64,
    pub status: &'a str,
    pub loan_type_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::loan_types)]
pub struct LoanType {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::loan_types)]
pub struct NewLoanType<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::installments)]
#[diesel(belongs_to(Loan, foreign_key = loan_id))]
pub struct Installment {
    pub id: i32,
    pub loan_id: i32,
    pub seq: i32,
    pub amount_cents: i64,
    pub status: String,
    pub due_date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::installments)]
pub struct NewInstallment<'a> {
    pub loan_id: i32,
    pub seq: i32,
    pub amount_cents: i64,
    pub status: &'a str,
    pub due_date: NaiveDate,
}

impl TryFrom<Loan> for DomainLoan {
    type Error = TypeConstraintError;

    fn try_from(loan: Loan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: loan.id,
            borrower: loan.borrower,
            amount_cents: loan.amount_cents,
            status: loan.status.parse()?,
            loan_type_id: loan.loan_type_id,
            created_at: loan.created_at,
            updated_at: loan.updated_at,
        })
    }
}

impl From<LoanType> for DomainLoanType {
    fn from(lt: LoanType) -> Self {
        Self {
            id: lt.id,
            name: lt.name,
        }
    }
}

impl TryFrom<Installment> for DomainInstallment {
    type Error = TypeConstraintError;

    fn try_from(inst: Installment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: inst.id,
            loan_id: inst.loan_id,
            seq: inst.seq,
            amount_cents: inst.amount_cents,
            status: inst.status.parse()?,
            due_date: inst.due_date,
        })
    }
}

impl<'a> From<&'a DomainNewLoan> for NewLoan<'a> {
    fn from(loan: &'a DomainNewLoan) -> Self {
        Self {
            borrower: loan.borrower.as_str(),
            amount_cents: loan.amount_cents,
            status: loan.status.as_str(),
            loan_type_id: loan.loan_type_id,
        }
    }
}

impl<'a> From<&'a DomainNewInstallment> for NewInstallment<'a> {
    fn from(inst: &'a DomainNewInstallment) -> Self {
        Self {
            loan_id: inst.loan_id,
            seq: inst.seq,
            amount_cents: inst.amount_cents,
            status: inst.status.as_str(),
            due_date: inst.due_date,
        }
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Lifecycle state of a loan, stored as uppercase text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Closed,
    Defaulted,
}

impl LoanStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Active => "ACTIVE",
            LoanStatus::Closed => "CLOSED",
            LoanStatus::Defaulted => "DEFAULTED",
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(LoanStatus::Active),
            "CLOSED" => Ok(LoanStatus::Closed),
            "DEFAULTED" => Ok(LoanStatus::Defaulted),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Loan product type; the lookup dataset used to label `loan_type` filters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanType {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Loan {
    pub id: i32,
    pub borrower: String,
    pub amount_cents: i64,
    pub status: LoanStatus,
    pub loan_type_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLoan {
    pub borrower: String,
    pub amount_cents: i64,
    pub status: LoanStatus,
    pub loan_type_id: i32,
}

impl NewLoan {
    #[must_use]
    pub fn new(borrower: String, amount_cents: i64, status: LoanStatus, loan_type_id: i32) -> Self {
        Self {
            borrower: borrower.trim().to_string(),
            amount_cents,
            status,
            loan_type_id,
        }
    }
}

/// Repayment state of a single installment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Due,
    Paid,
}

impl InstallmentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            InstallmentStatus::Due => "DUE",
            InstallmentStatus::Paid => "PAID",
        }
    }
}

impl FromStr for InstallmentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DUE" => Ok(InstallmentStatus::Due),
            "PAID" => Ok(InstallmentStatus::Paid),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// One row of a loan's repayment schedule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Installment {
    pub id: i32,
    pub loan_id: i32,
    pub seq: i32,
    pub amount_cents: i64,
    pub status: InstallmentStatus,
    pub due_date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewInstallment {
    pub loan_id: i32,
    pub seq: i32,
    pub amount_cents: i64,
    pub status: InstallmentStatus,
    pub due_date: NaiveDate,
}

/// Paid/outstanding split of a repayment schedule, for the detail page.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ScheduleTotals {
    pub paid_cents: i64,
    pub due_cents: i64,
}

impl ScheduleTotals {
    pub fn from_installments(installments: &[Installment]) -> Self {
        installments.iter().fold(Self::default(), |mut acc, inst| {
            match inst.status {
                InstallmentStatus::Paid => acc.paid_cents += inst.amount_cents,
                InstallmentStatus::Due => acc.due_cents += inst.amount_cents,
            }
            acc
        })
    }
}

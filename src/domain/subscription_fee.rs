use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Collection state of a periodic subscription fee.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeStatus {
    Due,
    Paid,
    Waived,
}

impl FeeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            FeeStatus::Due => "DUE",
            FeeStatus::Paid => "PAID",
            FeeStatus::Waived => "WAIVED",
        }
    }
}

impl Display for FeeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeeStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DUE" => Ok(FeeStatus::Due),
            "PAID" => Ok(FeeStatus::Paid),
            "WAIVED" => Ok(FeeStatus::Waived),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Monthly membership fee charged against an account.
///
/// `period` is the `YYYY-MM` month the fee covers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionFee {
    pub id: i32,
    pub account_id: i32,
    pub period: String,
    pub amount_cents: i64,
    pub status: FeeStatus,
    pub due_date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSubscriptionFee {
    pub account_id: i32,
    pub period: String,
    pub amount_cents: i64,
    pub status: FeeStatus,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!("due".parse::<FeeStatus>().unwrap(), FeeStatus::Due);
        assert_eq!(" Waived ".parse::<FeeStatus>().unwrap(), FeeStatus::Waived);
        assert!("overdue".parse::<FeeStatus>().is_err());
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Which side of the ledger a transaction touches.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Debit,
    Credit,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::Debit => "DEBIT",
            EntryKind::Credit => "CREDIT",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBIT" => Ok(EntryKind::Debit),
            "CREDIT" => Ok(EntryKind::Credit),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub amount_cents: i64,
    pub entry: EntryKind,
    pub description: String,
    pub booked_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTransaction {
    pub account_id: i32,
    pub amount_cents: i64,
    pub entry: EntryKind,
    pub description: String,
}

impl NewTransaction {
    #[must_use]
    pub fn new(account_id: i32, amount_cents: i64, entry: EntryKind, description: String) -> Self {
        Self {
            account_id,
            amount_cents,
            entry,
            description: description.trim().to_string(),
        }
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::forms::field;

#[derive(Debug, Deserialize, Validate)]
/// Filter form submitted above the transactions table.
pub struct TransactionFilterForm {
    /// Free-text search over descriptions.
    #[validate(length(max = 120))]
    pub search: Option<String>,
    /// Account id filter.
    pub account: Option<String>,
    /// `DEBIT` or `CREDIT`.
    pub entry: Option<String>,
}

impl TransactionFilterForm {
    pub fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("search", field(&self.search)),
            ("account", field(&self.account)),
            ("entry", field(&self.entry)),
        ]
    }
}

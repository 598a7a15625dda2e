use serde::Deserialize;
use validator::Validate;

use crate::forms::field;

#[derive(Debug, Deserialize, Validate)]
/// Filter form submitted above the subscription fees table.
pub struct FeeFilterForm {
    /// Free-text search over account owner names.
    #[validate(length(max = 120))]
    pub search: Option<String>,
    /// Account id filter.
    pub account: Option<String>,
    /// `DUE`, `PAID` or `WAIVED`.
    pub status: Option<String>,
}

impl FeeFilterForm {
    pub fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("search", field(&self.search)),
            ("account", field(&self.account)),
            ("status", field(&self.status)),
        ]
    }
}

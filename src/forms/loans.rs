use serde::Deserialize;
use validator::Validate;

use crate::forms::field;

#[derive(Debug, Deserialize, Validate)]
/// Filter form submitted above the loans table.
pub struct LoanFilterForm {
    /// Free-text search over borrower names.
    #[validate(length(max = 120))]
    pub search: Option<String>,
    /// Loan status filter, e.g. `ACTIVE`.
    pub status: Option<String>,
    /// Loan type id filter.
    pub loan_type: Option<String>,
}

impl LoanFilterForm {
    /// Parameter batch for the translator; blank fields clear their keys.
    pub fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("search", field(&self.search)),
            ("status", field(&self.status)),
            ("loan_type", field(&self.loan_type)),
        ]
    }
}

/// Status selector on the loan detail page.
#[derive(Debug, Deserialize)]
pub struct LoanStatusForm {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_clear_their_keys() {
        let form = LoanFilterForm {
            search: Some("  ali ".to_string()),
            status: Some("".to_string()),
            loan_type: None,
        };
        let params = form.to_params();
        assert_eq!(params[0], ("search", Some("ali".to_string())));
        assert_eq!(params[1], ("status", None));
        assert_eq!(params[2], ("loan_type", None));
    }
}

use serde::{Deserialize, Serialize};

/// Member account; the lookup dataset used to label `account` filters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub owner: String,
    pub number: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAccount {
    pub owner: String,
    pub number: String,
}

impl NewAccount {
    #[must_use]
    pub fn new(owner: String, number: String) -> Self {
        Self {
            owner: owner.trim().to_string(),
            number: number.trim().to_string(),
        }
    }
}

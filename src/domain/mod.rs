//! Domain aggregates exposed by the service layer.

pub mod account;
pub mod loan;
pub mod subscription_fee;
pub mod transaction;
pub mod types;

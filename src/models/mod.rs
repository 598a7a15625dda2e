//! Database models shared across the repository layer.

pub mod account;
pub mod auth;
pub mod config;
pub mod loan;
pub mod subscription_fee;
pub mod transaction;

//! Core data models for pocket-ledger

pub mod money;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, DEPOSIT_DESCRIPTION, PAYMENT_DESCRIPTION};

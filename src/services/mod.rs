//! Business logic layer
//!
//! Services sit between the menus and the store and enforce the entry rules.

pub mod entry;

pub use entry::{add_deposit, add_payment, AmountWarning, EntryReceipt, DEFAULT_AMOUNT, MIN_DEPOSIT};

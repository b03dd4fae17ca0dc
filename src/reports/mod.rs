//! Reports module for pocket-ledger
//!
//! Filtered, read-only views of the ledger: by amount sign, by date range
//! (with month and year presets) and by vendor.

pub mod filter;
pub mod period;

pub use filter::{by_amount_sign, by_date_range, by_vendor};
pub use period::ReportPeriod;

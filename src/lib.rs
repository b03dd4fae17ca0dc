//! pocket-ledger - a single-file personal finance ledger for the terminal
//!
//! Deposits and payments are recorded with date, time, vendor and amount in a
//! pipe-delimited text file and can be browsed through nested text menus:
//! all transactions, deposits, payments, date-range reports and vendor search.
//!
//! # Architecture
//!
//! - `config`: ledger file resolution and optional settings
//! - `error`: custom error types
//! - `models`: `Money` and `Transaction`
//! - `storage`: the ledger file codec and the in-memory `LedgerStore`
//! - `services`: deposit and payment entry rules
//! - `reports`: filters and date-range presets
//! - `display`: register formatting
//! - `cli`: console, entry dialogs and the menu state machine
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::RowPolicy;
//! use pocket_ledger::storage::LedgerStore;
//!
//! let mut store = LedgerStore::new("transactions.csv");
//! store.load(RowPolicy::Abort)?;
//! let deposits = pocket_ledger::reports::by_amount_sign(store.transactions(), true);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

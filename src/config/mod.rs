//! Configuration module for pocket-ledger
//!
//! - Ledger and settings file resolution
//! - Optional user settings

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{RowPolicy, Settings};

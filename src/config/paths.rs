//! Path management for pocket-ledger
//!
//! ## Path Resolution Order
//!
//! Ledger file:
//! 1. `--file` command-line option
//! 2. `LEDGER_FILE` environment variable
//! 3. `transactions.csv` in the working directory
//!
//! Settings file (optional):
//! 1. `--config` command-line option
//! 2. `LEDGER_CONFIG` environment variable

use std::path::{Path, PathBuf};

/// Environment variable overriding the ledger file location
pub const LEDGER_FILE_ENV: &str = "LEDGER_FILE";

/// Environment variable pointing at a settings file
pub const LEDGER_CONFIG_ENV: &str = "LEDGER_CONFIG";

/// Default ledger file name (pipe-delimited despite the extension)
pub const DEFAULT_LEDGER_FILE: &str = "transactions.csv";

/// Manages the files used by pocket-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    ledger_file: PathBuf,
    settings_file: Option<PathBuf>,
}

impl LedgerPaths {
    /// Resolve paths from explicit options, falling back to the environment
    /// and then to the defaults
    pub fn resolve(ledger_file: Option<PathBuf>, settings_file: Option<PathBuf>) -> Self {
        let ledger_file = ledger_file
            .or_else(|| env_path(LEDGER_FILE_ENV))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE));
        let settings_file = settings_file.or_else(|| env_path(LEDGER_CONFIG_ENV));

        Self {
            ledger_file,
            settings_file,
        }
    }

    /// Create LedgerPaths pointing at explicit files (useful for testing)
    pub fn with_files(ledger_file: PathBuf, settings_file: Option<PathBuf>) -> Self {
        Self {
            ledger_file,
            settings_file,
        }
    }

    /// Path of the pipe-delimited ledger file
    pub fn ledger_file(&self) -> &Path {
        &self.ledger_file
    }

    /// Path of the JSON settings file, if one was configured
    pub fn settings_file(&self) -> Option<&Path> {
        self.settings_file.as_deref()
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

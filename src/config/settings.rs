//! User settings for pocket-ledger
//!
//! Settings are optional: without a settings file every field takes its
//! default value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// What the loader does with a malformed row in the ledger file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Stop loading at the first bad row, keeping the rows read before it
    #[default]
    Abort,
    /// Log the bad row and keep loading
    Skip,
}

/// User settings for pocket-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Handling of malformed rows when loading the ledger file
    #[serde(default)]
    pub row_policy: RowPolicy,

    /// Base log level (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            row_policy: RowPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the configured file, or defaults when none is
    /// configured or the file does not exist yet
    pub fn load_or_default(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        match paths.settings_file() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to write settings file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

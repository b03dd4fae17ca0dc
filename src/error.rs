//! Custom error types for pocket-ledger
//!
//! Every failure a menu action can hit is one of these variants. The menu
//! prints it, logs it and returns to the enclosing prompt.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger file could not be created
    #[error("Could not create ledger file: {0}")]
    FileCreation(String),

    /// The ledger file could not be opened or read
    #[error("Could not read ledger file: {0}")]
    FileRead(String),

    /// A date, time, amount or row layout failed to parse
    #[error("{}", parse_message(.line, .reason))]
    Parse { line: Option<u64>, reason: String },

    /// The ledger file could not be opened or written for appending
    #[error("Could not write ledger file: {0}")]
    FileWrite(String),

    /// User input that cannot be stored
    #[error("Validation error: {0}")]
    Validation(String),

    /// Settings file problems
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

fn parse_message(line: &Option<u64>, reason: &str) -> String {
    match line {
        Some(line) => format!("Parse error on line {}: {}", line, reason),
        None => format!("Parse error: {}", reason),
    }
}

impl LedgerError {
    /// Create a parse error tied to a line of the ledger file
    pub fn parse_at(line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Create a parse error for interactive input
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            line: None,
            reason: reason.into(),
        }
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

//! Storage layer for pocket-ledger
//!
//! [`LedgerStore`] owns the in-memory ledger and mirrors every insertion to
//! the ledger file. The file is opened once per load and once per append;
//! no handle is kept between operations.

pub mod file_io;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::RowPolicy;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

pub use file_io::{format_line, parse_record, DATE_FORMAT, FIELD_DELIMITER, TIME_FORMAT};

/// What happened when the ledger file was loaded
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file existed; an empty one was created
    Created,
    /// The file was read
    Loaded {
        /// Number of transactions added to the ledger
        count: usize,
        /// Rows rejected under [`RowPolicy::Skip`]
        skipped: Vec<LedgerError>,
    },
}

/// The ordered, append-only ledger plus the file backing it
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Create an empty store bound to a ledger file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transactions: Vec::new(),
        }
    }

    /// Path of the backing ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All transactions in file order, then append order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Load the ledger file into memory
    ///
    /// A missing file is created empty. Under [`RowPolicy::Abort`] the first
    /// malformed row ends the load with an error, keeping every row parsed
    /// before it. Under [`RowPolicy::Skip`] malformed rows are reported in
    /// the outcome and loading continues.
    pub fn load(&mut self, policy: RowPolicy) -> LedgerResult<LoadOutcome> {
        if file_io::create_if_missing(&self.path)? {
            debug!(path = %self.path.display(), "created ledger file");
            return Ok(LoadOutcome::Created);
        }

        let mut count = 0;
        let mut skipped = Vec::new();

        for record in file_io::read_records(&self.path)? {
            let parsed = record.and_then(|(line_number, record)| {
                file_io::parse_record(&record, line_number)
            });
            match parsed {
                Ok(txn) => {
                    self.transactions.push(txn);
                    count += 1;
                }
                // Row-level problems only; I/O failures always end the load
                Err(err) if err.is_parse() && policy == RowPolicy::Skip => {
                    warn!(error = %err, "skipping malformed row");
                    skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        debug!(path = %self.path.display(), count, skipped = skipped.len(), "loaded ledger");
        Ok(LoadOutcome::Loaded { count, skipped })
    }

    /// Record a transaction in memory and append it to the ledger file
    ///
    /// The in-memory insertion happens even when the file write fails, so
    /// the session view stays complete; the write error is returned.
    pub fn append(&mut self, txn: Transaction) -> LedgerResult<()> {
        let written = file_io::append_record(&self.path, &txn);
        match &written {
            Ok(()) => debug!(line = %format_line(&txn), "appended transaction"),
            Err(err) => warn!(error = %err, "transaction kept in memory only"),
        }
        self.transactions.push(txn);
        written
    }
}

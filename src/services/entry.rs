//! Deposit and payment entry
//!
//! Amounts are entered as positive magnitudes. Amounts under the minimum are
//! not rejected: a default of 1.00 is substituted and the caller is warned.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};
use crate::storage::{LedgerStore, FIELD_DELIMITER};

/// Smallest deposit recorded as entered; anything less is replaced by
/// [`DEFAULT_AMOUNT`]
pub const MIN_DEPOSIT: Money = Money::from_cents(2);

/// Amount substituted for deposits and payments under the minimum
pub const DEFAULT_AMOUNT: Money = Money::from_dollars_cents(1, 0);

/// Why an entered amount was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountWarning {
    /// Deposit was below [`MIN_DEPOSIT`]
    DepositDefaulted { entered: Money },
    /// Payment magnitude was zero or negative
    PaymentDefaulted { entered: Money },
}

impl fmt::Display for AmountWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepositDefaulted { entered } => write!(
                f,
                "Deposit must be at least {} (got {})! Defaulting to {}...",
                MIN_DEPOSIT, entered, DEFAULT_AMOUNT
            ),
            Self::PaymentDefaulted { entered } => write!(
                f,
                "Payment must be positive (got {})! Defaulting to {}...",
                entered, DEFAULT_AMOUNT
            ),
        }
    }
}

/// Result of a successful entry
#[derive(Debug)]
pub struct EntryReceipt {
    /// The transaction as stored
    pub transaction: Transaction,
    /// Set when the entered amount was replaced by the default
    pub warning: Option<AmountWarning>,
    /// Outcome of the file append; the transaction is in memory either way
    pub persisted: LedgerResult<()>,
}

/// Record a deposit
pub fn add_deposit(
    store: &mut LedgerStore,
    date: NaiveDate,
    time: NaiveTime,
    vendor: &str,
    amount: Money,
) -> LedgerResult<EntryReceipt> {
    let vendor = validate_vendor(vendor)?;
    let (amount, warning) = if amount < MIN_DEPOSIT {
        (DEFAULT_AMOUNT, Some(AmountWarning::DepositDefaulted { entered: amount }))
    } else {
        (amount, None)
    };

    record(store, Transaction::deposit(date, time, vendor, amount), warning)
}

/// Record a payment; `amount` is the magnitude and is stored negated
pub fn add_payment(
    store: &mut LedgerStore,
    date: NaiveDate,
    time: NaiveTime,
    vendor: &str,
    amount: Money,
) -> LedgerResult<EntryReceipt> {
    let vendor = validate_vendor(vendor)?;
    let (amount, warning) = if !amount.is_positive() {
        (DEFAULT_AMOUNT, Some(AmountWarning::PaymentDefaulted { entered: amount }))
    } else {
        (amount, None)
    };

    record(store, Transaction::payment(date, time, vendor, amount), warning)
}

fn record(
    store: &mut LedgerStore,
    transaction: Transaction,
    warning: Option<AmountWarning>,
) -> LedgerResult<EntryReceipt> {
    if let Some(warning) = &warning {
        warn!(%warning, "amount replaced by default");
    }

    let persisted = store.append(transaction.clone());
    info!(
        description = transaction.description(),
        vendor = transaction.vendor(),
        amount = %transaction.amount(),
        persisted = persisted.is_ok(),
        "recorded transaction"
    );

    Ok(EntryReceipt {
        transaction,
        warning,
        persisted,
    })
}

/// Vendors end up inside a delimited line, so they cannot carry the
/// delimiter or a line break
fn validate_vendor(vendor: &str) -> LedgerResult<&str> {
    let vendor = vendor.trim();
    if vendor.contains(FIELD_DELIMITER) {
        return Err(LedgerError::Validation(format!(
            "Vendor cannot contain '{}'",
            FIELD_DELIMITER
        )));
    }
    if vendor.contains(['\n', '\r']) {
        return Err(LedgerError::Validation(
            "Vendor cannot contain line breaks".into(),
        ));
    }
    Ok(vendor)
}

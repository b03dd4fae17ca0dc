//! Ledger filters
//!
//! Pure functions over a slice of transactions. Results keep the original
//! relative order; nothing is re-sorted.

use chrono::NaiveDate;

use crate::models::Transaction;

/// Keep deposits (`amount >= 0`) or payments (`amount <= 0`)
///
/// A zero amount matches both views.
pub fn by_amount_sign(ledger: &[Transaction], want_non_negative: bool) -> Vec<&Transaction> {
    ledger
        .iter()
        .filter(|txn| {
            if want_non_negative {
                txn.is_deposit()
            } else {
                txn.is_payment()
            }
        })
        .collect()
}

/// Keep transactions dated within `[start, end]`, both ends inclusive
pub fn by_date_range(ledger: &[Transaction], start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
    ledger
        .iter()
        .filter(|txn| txn.date() >= start && txn.date() <= end)
        .collect()
}

/// Keep transactions whose vendor equals `name`, ignoring case
pub fn by_vendor<'a>(ledger: &'a [Transaction], name: &str) -> Vec<&'a Transaction> {
    let wanted = name.trim().to_lowercase();
    ledger
        .iter()
        .filter(|txn| txn.vendor().to_lowercase() == wanted)
        .collect()
}

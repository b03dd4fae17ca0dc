//! Transaction display formatting
//!
//! Renders ledger views as a fixed-width register with a count and total
//! footer, or the caller's message when nothing matched.

use crate::models::{Money, Transaction};
use crate::storage::{DATE_FORMAT, TIME_FORMAT};

const VENDOR_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 11;
const AMOUNT_WIDTH: usize = 14;
const RULE_WIDTH: usize = 10 + 1 + 8 + 1 + DESCRIPTION_WIDTH + 1 + VENDOR_WIDTH + 1 + AMOUNT_WIDTH;

/// Shown in place of a total that does not fit in the amount range
const TOTAL_OUT_OF_RANGE: &str = "out of range";

/// Format a single transaction as one register row
pub fn format_transaction_row(txn: &Transaction, currency_symbol: &str) -> String {
    format!(
        "{} {} {:dw$} {:vw$} {:>aw$}",
        txn.date().format(DATE_FORMAT),
        txn.time().format(TIME_FORMAT),
        truncate(txn.description(), DESCRIPTION_WIDTH),
        truncate(txn.vendor(), VENDOR_WIDTH),
        txn.amount().format_with_symbol(currency_symbol),
        dw = DESCRIPTION_WIDTH,
        vw = VENDOR_WIDTH,
        aw = AMOUNT_WIDTH,
    )
}

/// Format transactions as a register, or `empty_message` when there are none
pub fn format_transaction_register(
    transactions: &[&Transaction],
    empty_message: &str,
    currency_symbol: &str,
) -> String {
    if transactions.is_empty() {
        return format!("{}\n", empty_message);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:8} {:dw$} {:vw$} {:>aw$}\n",
        "Date",
        "Time",
        "Description",
        "Vendor",
        "Amount",
        dw = DESCRIPTION_WIDTH,
        vw = VENDOR_WIDTH,
        aw = AMOUNT_WIDTH,
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency_symbol));
        output.push('\n');
    }

    let total = transactions
        .iter()
        .try_fold(Money::zero(), |total, txn| total.checked_add(txn.amount()))
        .map_or_else(
            || TOTAL_OUT_OF_RANGE.to_string(),
            |total| total.format_with_symbol(currency_symbol),
        );
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<width$} {:>aw$}\n",
        format!("{} transaction(s)", transactions.len()),
        total,
        width = RULE_WIDTH - AMOUNT_WIDTH - 1,
        aw = AMOUNT_WIDTH,
    ));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

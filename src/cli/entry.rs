//! Interactive deposit and payment entry
//!
//! Asks for date, time, vendor and amount one at a time. The first answer
//! that fails to parse abandons the entry; nothing partial is stored.

use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use tracing::error;

use super::prompt::Console;
use crate::display::format_transaction_row;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::services::{add_deposit, add_payment};
use crate::storage::file_io::{parse_date, parse_time};
use crate::storage::LedgerStore;

/// Which kind of transaction the dialog records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Deposit,
    Payment,
}

impl EntryKind {
    fn noun(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Payment => "payment",
        }
    }
}

struct EntryInput {
    date: NaiveDate,
    time: NaiveTime,
    vendor: String,
    amount: Money,
    /// Fractional digits beyond cents were dropped from the answer
    truncated: bool,
}

/// Run one entry dialog
///
/// Bad input and storage failures are reported on the console; only console
/// I/O failures are returned.
pub fn run_entry_dialog<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut LedgerStore,
    kind: EntryKind,
    currency_symbol: &str,
) -> LedgerResult<()> {
    let input = match read_entry(console, kind)? {
        Some(Ok(input)) => input,
        Some(Err(err)) => {
            error!(error = %err, "entry abandoned");
            return console.error(err);
        }
        // Input closed mid-dialog
        None => return Ok(()),
    };

    if input.truncated {
        console.warning(format_args!(
            "Only two decimal places are kept; using {}",
            input.amount
        ))?;
    }

    let recorded = match kind {
        EntryKind::Deposit => add_deposit(store, input.date, input.time, &input.vendor, input.amount),
        EntryKind::Payment => add_payment(store, input.date, input.time, &input.vendor, input.amount),
    };

    let receipt = match recorded {
        Ok(receipt) => receipt,
        Err(err) => {
            error!(error = %err, "entry rejected");
            return console.error(err);
        }
    };

    if let Some(warning) = &receipt.warning {
        console.warning(warning)?;
    }
    if let Err(err) = &receipt.persisted {
        console.error(format_args!("{} (kept for this session only)", err))?;
    }
    console.say(format_args!(
        "Recorded: {}",
        format_transaction_row(&receipt.transaction, currency_symbol)
    ))
}

/// Collect the four answers; the inner `Result` carries parse failures
fn read_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    kind: EntryKind,
) -> LedgerResult<Option<LedgerResult<EntryInput>>> {
    let noun = kind.noun();

    let Some(answer) = console.prompt(&format!(
        "Please add the date of the {} (Example: 2023-03-14): ",
        noun
    ))?
    else {
        return Ok(None);
    };
    let date = match parse_date(&answer) {
        Ok(date) => date,
        Err(err) => return Ok(Some(Err(err))),
    };

    let Some(answer) = console.prompt(&format!(
        "Please add the time of the {} (Example: 14:12:55): ",
        noun
    ))?
    else {
        return Ok(None);
    };
    let time = match parse_time(&answer) {
        Ok(time) => time,
        Err(err) => return Ok(Some(Err(err))),
    };

    let Some(vendor) = console.prompt("Please enter the name of the vendor: ")? else {
        return Ok(None);
    };

    let Some(answer) = console.prompt(&format!("Please enter the amount of the {}: $", noun))?
    else {
        return Ok(None);
    };
    let (amount, truncated) = match Money::parse_with_truncation(&answer) {
        Ok(parsed) => parsed,
        Err(err) => return Ok(Some(Err(LedgerError::parse(err.to_string())))),
    };

    Ok(Some(Ok(EntryInput {
        date,
        time,
        vendor,
        amount,
        truncated,
    })))
}

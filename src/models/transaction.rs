//! Transaction model
//!
//! A transaction is an immutable record of money moving in (deposit, positive
//! amount) or out (payment, negative amount) on a given date and time.

use chrono::{NaiveDate, NaiveTime};

use super::money::Money;

/// Description stored for deposits
pub const DEPOSIT_DESCRIPTION: &str = "Deposit";

/// Description stored for payments
pub const PAYMENT_DESCRIPTION: &str = "Payment";

/// A single ledger entry
///
/// Equality is structural: two transactions with the same five fields are
/// equal, there is no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    time: NaiveTime,
    description: String,
    vendor: String,
    /// Positive for inflow, negative for outflow
    amount: Money,
}

impl Transaction {
    /// Create a transaction from all of its fields
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            time,
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    /// Create a deposit; the amount is stored as given
    pub fn deposit(date: NaiveDate, time: NaiveTime, vendor: impl Into<String>, amount: Money) -> Self {
        Self::new(date, time, DEPOSIT_DESCRIPTION, vendor, amount)
    }

    /// Create a payment from its magnitude; the stored amount is negated
    pub fn payment(date: NaiveDate, time: NaiveTime, vendor: impl Into<String>, amount: Money) -> Self {
        Self::new(date, time, PAYMENT_DESCRIPTION, vendor, -amount)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Deposits are all transactions with a non-negative amount
    pub fn is_deposit(&self) -> bool {
        !self.amount.is_negative()
    }

    /// Payments are all transactions with a non-positive amount
    pub fn is_payment(&self) -> bool {
        !self.amount.is_positive()
    }
}

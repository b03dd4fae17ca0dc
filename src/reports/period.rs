//! Date-range report presets
//!
//! Each preset turns "today" into an inclusive date range. The caller passes
//! today's date at the moment the report is requested.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// The four date-range reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// First day of the current month through today
    MonthToDate,
    /// First through last day of the previous month
    PreviousMonth,
    /// January 1 of the current year through today
    YearToDate,
    /// January 1 through December 31 of the previous year
    PreviousYear,
}

impl ReportPeriod {
    /// Inclusive `(start, end)` range for this preset relative to `today`
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let month_start = first_of_month(today.year(), today.month());
        match self {
            Self::MonthToDate => (month_start, today),
            Self::PreviousMonth => {
                let last = month_start - Duration::days(1);
                (first_of_month(last.year(), last.month()), last)
            }
            Self::YearToDate => (first_of_month(today.year(), 1), today),
            Self::PreviousYear => {
                let year = today.year() - 1;
                (first_of_month(year, 1), first_of_month(year + 1, 1) - Duration::days(1))
            }
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthToDate => write!(f, "Month To Date"),
            Self::PreviousMonth => write!(f, "Previous Month"),
            Self::YearToDate => write!(f, "Year To Date"),
            Self::PreviousYear => write!(f, "Previous Year"),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Day 1 exists for every month of every year chrono can represent
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

//! Menu state machine
//!
//! Three nested screens: Main, Ledger and Reports. Each turn prints the
//! current screen's menu, reads one line and dispatches it. Every command is
//! its own branch; submenus are left only through their back command.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use super::entry::{run_entry_dialog, EntryKind};
use super::prompt::Console;
use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::error::LedgerResult;
use crate::models::Transaction;
use crate::reports::{by_amount_sign, by_date_range, by_vendor, ReportPeriod};
use crate::storage::{LedgerStore, DATE_FORMAT};

/// Message shown for any view without matches
pub const NO_RESULTS: &str = "No results found.";

/// Today's date from the local wall clock
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The screens of the menu state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Ledger,
    Reports,
}

/// Commands of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Deposit,
    Payment,
    Ledger,
    Exit,
}

impl MainCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "D" => Some(Self::Deposit),
            "P" => Some(Self::Payment),
            "L" => Some(Self::Ledger),
            "X" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Commands of the ledger screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerCommand {
    All,
    Deposits,
    Payments,
    Reports,
    Home,
}

impl LedgerCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "A" => Some(Self::All),
            "D" => Some(Self::Deposits),
            "P" => Some(Self::Payments),
            "R" => Some(Self::Reports),
            "H" => Some(Self::Home),
            _ => None,
        }
    }
}

/// Commands of the reports screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCommand {
    Period(ReportPeriod),
    SearchByVendor,
    Back,
}

impl ReportCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Period(ReportPeriod::MonthToDate)),
            "2" => Some(Self::Period(ReportPeriod::PreviousMonth)),
            "3" => Some(Self::Period(ReportPeriod::YearToDate)),
            "4" => Some(Self::Period(ReportPeriod::PreviousYear)),
            "5" => Some(Self::SearchByVendor),
            "0" => Some(Self::Back),
            _ => None,
        }
    }
}

/// An interactive session over one ledger
pub struct Session<R, W> {
    console: Console<R, W>,
    store: LedgerStore,
    settings: Settings,
    clock: fn() -> NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, store: LedgerStore, settings: Settings) -> Self {
        Self {
            console,
            store,
            settings,
            clock: local_today,
        }
    }

    /// Replace the wall clock used by the date-range reports
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn into_parts(self) -> (Console<R, W>, LedgerStore) {
        (self.console, self.store)
    }

    /// Run until the user exits from the main screen or input ends
    pub fn run(&mut self) -> LedgerResult<()> {
        let mut screen = Screen::Main;
        loop {
            self.show_menu(screen)?;
            let Some(input) = self.console.read_line()? else {
                debug!("input closed, leaving menu");
                return Ok(());
            };
            match self.step(screen, &input)? {
                Some(next) => screen = next,
                None => return Ok(()),
            }
        }
    }

    /// Handle one line of input on `screen`
    ///
    /// Returns the next screen, or `None` when the session is over.
    pub fn step(&mut self, screen: Screen, input: &str) -> LedgerResult<Option<Screen>> {
        match screen {
            Screen::Main => self.step_main(input),
            Screen::Ledger => self.step_ledger(input),
            Screen::Reports => self.step_reports(input),
        }
    }

    fn step_main(&mut self, input: &str) -> LedgerResult<Option<Screen>> {
        match MainCommand::parse(input) {
            Some(MainCommand::Deposit) => self.enter(EntryKind::Deposit)?,
            Some(MainCommand::Payment) => self.enter(EntryKind::Payment)?,
            Some(MainCommand::Ledger) => return Ok(Some(Screen::Ledger)),
            Some(MainCommand::Exit) => return Ok(None),
            None => self.invalid_option()?,
        }
        Ok(Some(Screen::Main))
    }

    fn step_ledger(&mut self, input: &str) -> LedgerResult<Option<Screen>> {
        match LedgerCommand::parse(input) {
            Some(LedgerCommand::All) => {
                self.show("All Transactions", |ledger| ledger.iter().collect())?
            }
            Some(LedgerCommand::Deposits) => {
                self.show("Deposits", |ledger| by_amount_sign(ledger, true))?
            }
            Some(LedgerCommand::Payments) => {
                self.show("Payments", |ledger| by_amount_sign(ledger, false))?
            }
            Some(LedgerCommand::Reports) => return Ok(Some(Screen::Reports)),
            Some(LedgerCommand::Home) => return Ok(Some(Screen::Main)),
            None => self.invalid_option()?,
        }
        Ok(Some(Screen::Ledger))
    }

    fn step_reports(&mut self, input: &str) -> LedgerResult<Option<Screen>> {
        match ReportCommand::parse(input) {
            Some(ReportCommand::Period(period)) => {
                let (start, end) = period.range((self.clock)());
                let title = format!(
                    "{} ({} to {})",
                    period,
                    start.format(DATE_FORMAT),
                    end.format(DATE_FORMAT)
                );
                self.show(&title, |ledger| by_date_range(ledger, start, end))?;
            }
            Some(ReportCommand::SearchByVendor) => {
                let Some(vendor) = self.console.prompt("Please enter the vendor name: ")? else {
                    return Ok(None);
                };
                let title = format!("Vendor: {}", vendor.trim());
                self.show(&title, |ledger| by_vendor(ledger, &vendor))?;
            }
            Some(ReportCommand::Back) => return Ok(Some(Screen::Ledger)),
            None => self.invalid_option()?,
        }
        Ok(Some(Screen::Reports))
    }

    fn enter(&mut self, kind: EntryKind) -> LedgerResult<()> {
        run_entry_dialog(
            &mut self.console,
            &mut self.store,
            kind,
            &self.settings.currency_symbol,
        )
    }

    /// Print a titled register of the transactions picked by `select`
    fn show<F>(&mut self, title: &str, select: F) -> LedgerResult<()>
    where
        F: for<'a> FnOnce(&'a [Transaction]) -> Vec<&'a Transaction>,
    {
        let found = select(self.store.transactions());
        debug!(view = title, matches = found.len(), "showing view");
        self.console.say(format_args!("\n== {} ==", title))?;
        self.console.write_block(&format_transaction_register(
            &found,
            NO_RESULTS,
            &self.settings.currency_symbol,
        ))
    }

    fn invalid_option(&mut self) -> LedgerResult<()> {
        self.console.say("Invalid option")
    }

    fn show_menu(&mut self, screen: Screen) -> LedgerResult<()> {
        let lines: &[&str] = match screen {
            Screen::Main => &[
                "",
                "Welcome to Pocket Ledger",
                "Choose an option:",
                "D) Add Deposit",
                "P) Make Payment (Debit)",
                "L) Ledger",
                "X) Exit",
            ],
            Screen::Ledger => &[
                "",
                "Ledger",
                "Choose an option:",
                "A) All",
                "D) Deposits",
                "P) Payments",
                "R) Reports",
                "H) Home",
            ],
            Screen::Reports => &[
                "",
                "Reports",
                "Choose an option:",
                "1) Month To Date",
                "2) Previous Month",
                "3) Year To Date",
                "4) Previous Year",
                "5) Search by Vendor",
                "0) Back",
            ],
        };
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowPolicy;
    use crate::models::Money;
    use chrono::NaiveTime;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn session(temp_dir: &TempDir, input: &str) -> TestSession {
        let mut store = LedgerStore::new(temp_dir.path().join("transactions.csv"));
        store.load(RowPolicy::Abort).unwrap();
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::new(console, store, Settings::default()).with_clock(fixed_today)
    }

    fn seeded(temp_dir: &TempDir, input: &str) -> TestSession {
        let mut session = session(temp_dir, input);
        let at = |y, m, d, vendor: &str, cents| {
            Transaction::new(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                if cents < 0 { "Payment" } else { "Deposit" },
                vendor,
                Money::from_cents(cents),
            )
        };
        for txn in [
            at(2023, 6, 1, "Oldco", 100),
            at(2024, 2, 10, "Grocer", -2000),
            at(2024, 3, 1, "Acme", 5000),
            at(2024, 3, 15, "AMAZON", -1500),
        ] {
            session.store.append(txn).unwrap();
        }
        session
    }

    fn output(session: TestSession) -> String {
        let (console, _) = session.into_parts();
        let (_, output) = console.into_inner();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_command_parsing_is_case_insensitive() {
        assert_eq!(MainCommand::parse("d"), Some(MainCommand::Deposit));
        assert_eq!(MainCommand::parse(" X "), Some(MainCommand::Exit));
        assert_eq!(LedgerCommand::parse("h"), Some(LedgerCommand::Home));
        assert_eq!(
            ReportCommand::parse("2"),
            Some(ReportCommand::Period(ReportPeriod::PreviousMonth))
        );
        assert_eq!(MainCommand::parse("deposit"), None);
        assert_eq!(ReportCommand::parse("6"), None);
    }

    #[test]
    fn test_transitions() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir, "");

        assert_eq!(session.step(Screen::Main, "l").unwrap(), Some(Screen::Ledger));
        assert_eq!(session.step(Screen::Ledger, "r").unwrap(), Some(Screen::Reports));
        assert_eq!(session.step(Screen::Reports, "0").unwrap(), Some(Screen::Ledger));
        assert_eq!(session.step(Screen::Ledger, "H").unwrap(), Some(Screen::Main));
        assert_eq!(session.step(Screen::Main, "?").unwrap(), Some(Screen::Main));
        assert_eq!(session.step(Screen::Main, "x").unwrap(), None);
    }

    #[test]
    fn test_back_from_reports_is_not_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir, "");

        session.step(Screen::Reports, "0").unwrap();

        assert!(!output(session).contains("Invalid option"));
    }

    #[test]
    fn test_month_to_date_runs_only_that_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = seeded(&temp_dir, "");

        session.step(Screen::Reports, "1").unwrap();

        let out = output(session);
        assert!(out.contains("== Month To Date (2024-03-01 to 2024-03-15) =="));
        assert!(out.contains("Acme"));
        assert!(out.contains("AMAZON"));
        assert!(!out.contains("Grocer"));
        assert!(!out.contains("Previous Month"));
        assert!(!out.contains("Year To Date"));
        assert!(!out.contains("Vendor:"));
    }

    #[test]
    fn test_previous_month_and_year_reports() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = seeded(&temp_dir, "");

        session.step(Screen::Reports, "2").unwrap();
        session.step(Screen::Reports, "4").unwrap();

        let out = output(session);
        assert!(out.contains("== Previous Month (2024-02-01 to 2024-02-29) =="));
        assert!(out.contains("Grocer"));
        assert!(out.contains("== Previous Year (2023-01-01 to 2023-12-31) =="));
        assert!(out.contains("Oldco"));
    }

    #[test]
    fn test_vendor_search_prompts_for_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = seeded(&temp_dir, "amazon\n");

        session.step(Screen::Reports, "5").unwrap();

        let out = output(session);
        assert!(out.contains("Please enter the vendor name: "));
        assert!(out.contains("== Vendor: amazon =="));
        assert!(out.contains("-$15.00"));
    }

    #[test]
    fn test_empty_views_report_no_results() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir, "");

        session.step(Screen::Ledger, "p").unwrap();

        assert!(output(session).contains(NO_RESULTS));
    }

    #[test]
    fn test_full_session_deposit_then_views() {
        let temp_dir = TempDir::new().unwrap();
        let input = "d\n2024-01-01\n10:00:00\nAcme\n50.00\nl\nd\np\nh\nx\n";
        let mut session = session(&temp_dir, input);

        session.run().unwrap();

        assert_eq!(session.store().len(), 1);
        assert_eq!(session.store().transactions()[0].amount().cents(), 5000);
        let out = output(session);
        let deposits = out.find("== Deposits ==").unwrap();
        let payments = out.find("== Payments ==").unwrap();
        assert!(out[deposits..payments].contains("Acme"));
        assert!(out[payments..].contains(NO_RESULTS));
    }

    #[test]
    fn test_run_ends_when_input_closes_in_submenu() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir, "l\nr\n");

        session.run().unwrap();

        assert!(output(session).contains("5) Search by Vendor"));
    }
}

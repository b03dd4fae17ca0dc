//! Line-oriented console
//!
//! Wraps any `BufRead` + `Write` pair so menus can run against the terminal
//! or against in-memory buffers in tests.

use std::fmt::Display;
use std::io::{self, BufRead, Stdin, Stdout, Write};

use crate::error::LedgerResult;

/// Input and output for the interactive menus
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line break
    ///
    /// Returns `None` once the input is exhausted.
    pub fn read_line(&mut self) -> LedgerResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Print `text` without a line break, then read the answer
    pub fn prompt(&mut self, text: &str) -> LedgerResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Print a line
    pub fn say(&mut self, text: impl Display) -> LedgerResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a line prefixed with `ERROR:`
    pub fn error(&mut self, err: impl Display) -> LedgerResult<()> {
        self.say(format_args!("ERROR: {}", err))
    }

    /// Print a line prefixed with `WARNING:`
    pub fn warning(&mut self, warning: impl Display) -> LedgerResult<()> {
        self.say(format_args!("WARNING: {}", warning))
    }

    /// Print pre-formatted text as is
    pub fn write_block(&mut self, text: &str) -> LedgerResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Give back the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

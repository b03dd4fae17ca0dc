//! Ledger file codec and scoped file operations
//!
//! The ledger file is line oriented: a header line that is never interpreted,
//! then one transaction per line as `date|time|description|vendor|amount`.
//! Records are read with a `csv` reader configured for the `|` delimiter and
//! no quoting. New records are appended as a line break followed by the
//! record, so the file never ends with a trailing newline written by us.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use csv::{Position, ReaderBuilder, StringRecord};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};

/// Separator between the fields of a record
pub const FIELD_DELIMITER: char = '|';

/// Date layout in the file and at the prompt (`yyyy-MM-dd`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time layout in the file and at the prompt (`HH:mm:ss`)
pub const TIME_FORMAT: &str = "%H:%M:%S";

const FIELD_COUNT: usize = 5;

/// Lines consumed before the record reader starts
const HEADER_LINES: u64 = 1;

/// Parse a `yyyy-MM-dd` date
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| LedgerError::parse(format!("invalid date '{}': {}", input, e)))
}

/// Parse a `HH:mm:ss` time
pub fn parse_time(input: &str) -> LedgerResult<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|e| LedgerError::parse(format!("invalid time '{}': {}", input, e)))
}

/// Parse a signed decimal amount
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| LedgerError::parse(e.to_string()))
}

fn record_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parse one record of the ledger file
pub fn parse_record(record: &StringRecord, line_number: u64) -> LedgerResult<Transaction> {
    if record.len() != FIELD_COUNT {
        return Err(LedgerError::parse_at(
            line_number,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let at_line = |err: LedgerError| match err {
        LedgerError::Parse { reason, .. } => LedgerError::parse_at(line_number, reason),
        other => other,
    };

    let date = parse_date(&record[0]).map_err(at_line)?;
    let time = parse_time(&record[1]).map_err(at_line)?;
    let amount = parse_amount(&record[4]).map_err(at_line)?;

    Ok(Transaction::new(date, time, &record[2], &record[3], amount))
}

/// Render a transaction as a record line (without line break)
pub fn format_line(txn: &Transaction) -> String {
    format!(
        "{date}{d}{time}{d}{description}{d}{vendor}{d}{amount}",
        date = txn.date().format(DATE_FORMAT),
        time = txn.time().format(TIME_FORMAT),
        description = txn.description(),
        vendor = txn.vendor(),
        amount = txn.amount().to_plain_string(),
        d = FIELD_DELIMITER,
    )
}

/// Create an empty ledger file if none exists
///
/// Returns `true` when the file was created by this call.
pub fn create_if_missing(path: &Path) -> LedgerResult<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::FileCreation(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(LedgerError::FileCreation(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

/// Read the records of a ledger file
///
/// Yields `(line_number, record)` pairs with 1-based line numbers. The first
/// line is the header slot and is skipped unread; blank lines are skipped.
/// A row that cannot be decoded is a parse error for that row only.
pub fn read_records(
    path: &Path,
) -> LedgerResult<impl Iterator<Item = LedgerResult<(u64, StringRecord)>>> {
    let read_error =
        |e: std::io::Error| LedgerError::FileRead(format!("{}: {}", path.display(), e));

    let mut input = BufReader::new(File::open(path).map_err(read_error)?);
    let mut header = Vec::new();
    input.read_until(b'\n', &mut header).map_err(read_error)?;

    let display = path.display().to_string();
    Ok(record_reader(input)
        .into_records()
        .filter_map(move |result| match result {
            Ok(record) if is_blank(&record) => None,
            Ok(record) => Some(Ok((line_of(record.position()), record))),
            Err(e) => Some(Err(record_error(&display, e))),
        }))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// File line of a record, counting the header slot
fn line_of(position: Option<&Position>) -> u64 {
    position.map_or(0, Position::line) + HEADER_LINES
}

fn record_error(source: &str, err: csv::Error) -> LedgerError {
    let line = err.position().map(|p| line_of(Some(p)));
    let reason = match err.kind() {
        csv::ErrorKind::Io(e) => return LedgerError::FileRead(format!("{}: {}", source, e)),
        csv::ErrorKind::Utf8 { err, .. } => {
            format!("invalid UTF-8 in field {}", err.field() + 1)
        }
        _ => err.to_string(),
    };
    match line {
        Some(line) => LedgerError::parse_at(line, reason),
        None => LedgerError::parse(reason),
    }
}

/// Append one record to the ledger file, creating the file if it vanished
pub fn append_record(path: &Path, txn: &Transaction) -> LedgerResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::FileWrite(format!("{}: {}", path.display(), e)))?;

    write!(file, "\n{}", format_line(txn))
        .map_err(|e| LedgerError::FileWrite(format!("{}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| LedgerError::FileWrite(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn parse_line(line: &str, line_number: u64) -> LedgerResult<Transaction> {
        let record = record_reader(line.as_bytes()).records().next().unwrap().unwrap();
        parse_record(&record, line_number)
    }

    fn sample() -> Transaction {
        Transaction::payment(
            NaiveDate::from_ymd_opt(2023, 4, 29).unwrap(),
            NaiveTime::from_hms_opt(13, 45, 0).unwrap(),
            "Amazon",
            Money::from_cents(2999),
        )
    }

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(&sample()),
            "2023-04-29|13:45:00|Payment|Amazon|-29.99"
        );
    }

    #[test]
    fn test_parse_line() {
        let txn = parse_line("2023-04-29|13:45:00|Payment|Amazon|-29.99", 2).unwrap();
        assert_eq!(txn, sample());
    }

    #[test]
    fn test_parse_line_accepts_one_decimal_amounts() {
        let txn = parse_line("2024-01-01|10:00:00|Deposit|Acme|50.0", 2).unwrap();
        assert_eq!(txn.amount().cents(), 5000);
    }

    #[rstest]
    #[case("2023-04-29|13:45:00|Payment|Amazon", "expected 5 fields, found 4")]
    #[case("2023-04-29|13:45:00|Payment|Amazon|1|2", "expected 5 fields, found 6")]
    #[case("2023-02-30|13:45:00|Payment|Amazon|-1.00", "invalid date")]
    #[case("04/29/2023|13:45:00|Payment|Amazon|-1.00", "invalid date")]
    #[case("2023-04-29|25:00:00|Payment|Amazon|-1.00", "invalid time")]
    #[case("2023-04-29|13:45|Payment|Amazon|-1.00", "invalid time")]
    #[case("2023-04-29|13:45:00|Payment|Amazon|ten", "Invalid money format")]
    fn test_parse_line_rejects(#[case] line: &str, #[case] expected: &str) {
        let err = parse_line(line, 7).unwrap_err();
        match err {
            LedgerError::Parse { line, reason } => {
                assert_eq!(line, Some(7));
                assert!(reason.contains(expected), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_create_if_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("transactions.csv");

        assert!(create_if_missing(&path).unwrap());
        assert!(path.exists());
        assert!(!create_if_missing(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_never_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        fs::write(&path, "date|time|description|vendor|amount").unwrap();

        append_record(&path, &sample()).unwrap();
        append_record(&path, &sample()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "date|time|description|vendor|amount\n\
             2023-04-29|13:45:00|Payment|Amazon|-29.99\n\
             2023-04-29|13:45:00|Payment|Amazon|-29.99"
        );
    }

    fn fields(record: &StringRecord) -> Vec<&str> {
        record.iter().collect()
    }

    #[test]
    fn test_read_records_skips_header_and_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        fs::write(&path, "header|with|fields\n\n a | b \r\n   \n\nc|d").unwrap();

        let records: Vec<_> = read_records(&path)
            .unwrap()
            .collect::<LedgerResult<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(fields(&records[0].1), vec!["a", "b"]);
        assert_eq!(fields(&records[1].1), vec!["c", "d"]);
    }

    #[test]
    fn test_read_records_line_numbers_count_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        fs::write(&path, "\n2023-04-29|13:45:00|Payment|Amazon|-29.99\nx|y").unwrap();

        let lines: Vec<u64> = read_records(&path)
            .unwrap()
            .map(|record| record.unwrap().0)
            .collect();

        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_read_records_keeps_pipes_and_quotes_literal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        fs::write(&path, "header\n2024-01-01|10:00:00|Deposit|\"Joe's\" Diner|5.00").unwrap();

        let (line, record) = read_records(&path).unwrap().next().unwrap().unwrap();
        let txn = parse_record(&record, line).unwrap();

        assert_eq!(txn.vendor(), "\"Joe's\" Diner");
    }

    #[test]
    fn test_read_records_bad_encoding_is_row_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        let mut contents = b"header\n2024-01-01|10:00:00|Deposit|Caf".to_vec();
        contents.push(0xE9);
        contents.extend_from_slice(b"|2.00\n2024-01-02|10:00:00|Deposit|Acme|3.00");
        fs::write(&path, contents).unwrap();

        let mut records = read_records(&path).unwrap();

        match records.next() {
            Some(Err(LedgerError::Parse { line, reason })) => {
                assert_eq!(line, Some(2));
                assert!(reason.contains("invalid UTF-8 in field 4"), "{reason}");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
        let (line, record) = records.next().unwrap().unwrap();
        assert_eq!(line, 3);
        assert_eq!(parse_record(&record, line).unwrap().vendor(), "Acme");
        assert!(records.next().is_none());
    }

    #[test]
    fn test_create_if_missing_reports_creation_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "plain file").unwrap();

        let err = create_if_missing(&blocker.join("transactions.csv")).unwrap_err();

        assert!(matches!(err, LedgerError::FileCreation(_)));
    }

    #[test]
    fn test_read_records_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_records(&temp_dir.path().join("absent.csv"));
        assert!(matches!(result, Err(LedgerError::FileRead(_))));
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert_eq!(
            parse_time("23:59:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
        assert!(parse_time("noon").is_err());
    }
}

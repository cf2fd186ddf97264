use chrono::{DateTime, NaiveDate};
use log::debug;

use crate::error::{DashboardError, Result};
use crate::types::CommitRecord;

/// The canonical commit ledger.
///
/// Holds every parsed record together with the most recent date in the
/// ledger, computed once here and used as the reference point for every
/// time window afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    records: Vec<CommitRecord>,
    max_date: NaiveDate,
}

impl Ledger {
    /// Build a ledger from parsed records.
    ///
    /// Fails with [`DashboardError::NoValidDates`] when there is nothing to
    /// take a reference date from.
    pub fn new(records: Vec<CommitRecord>) -> Result<Self> {
        let max_date = max_date(&records).ok_or(DashboardError::NoValidDates)?;
        Ok(Self { records, max_date })
    }

    /// Parse CSV text and build a ledger from it in one step.
    pub fn from_csv(text: &str) -> Result<Self> {
        Self::new(parse_ledger_csv(text))
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse the commit ledger CSV.
///
/// The first line is a header and is always discarded. Each remaining line
/// maps columns 0..3 to date, developer, repository and commit count. Rows
/// missing a date, developer or repository are skipped, as are rows whose
/// date does not parse. See [`parse_commit_count`] for the count column.
pub fn parse_ledger_csv(text: &str) -> Vec<CommitRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in text.split('\n').skip(1) {
        match parse_row(line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} ledger rows, skipped {} malformed rows",
        records.len(),
        skipped
    );
    records
}

fn parse_row(line: &str) -> Option<CommitRecord> {
    let mut columns = line.split(',').map(str::trim);
    let date = columns.next().unwrap_or_default();
    let developer = columns.next().unwrap_or_default();
    let repository = columns.next().unwrap_or_default();
    let commit_count = columns.next().unwrap_or_default();

    if date.is_empty() || developer.is_empty() || repository.is_empty() {
        return None;
    }

    Some(CommitRecord {
        date: parse_date(date)?,
        developer: developer.to_string(),
        repository: repository.to_string(),
        commit_count: parse_commit_count(commit_count),
    })
}

/// Read the leading base-10 integer of a count cell.
///
/// Trailing text after the digits is ignored, so `3.0` reads as 3 and
/// `7abc` as 7. A cell with no leading digits, or a negative one, counts
/// as 0. Values beyond `u64::MAX` saturate.
pub fn parse_commit_count(value: &str) -> u64 {
    let value = value.trim();
    let unsigned = match value.strip_prefix('-') {
        Some(_) => return 0,
        None => value.strip_prefix('+').unwrap_or(value),
    };
    unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

/// Parse an ISO-8601 calendar date, accepting a full timestamp as well.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Most recent date across all records, `None` for an empty ledger.
pub fn max_date(records: &[CommitRecord]) -> Option<NaiveDate> {
    records.iter().map(|r| r.date).max()
}

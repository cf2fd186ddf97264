use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use crate::types::{CommitRecord, TimeWindow};

/// Bot and service accounts that never count towards any aggregation.
pub const EXCLUDED_DEVELOPERS: &[&str] = &["forosuru"];

/// Developer identifiers excluded from every window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    developers: HashSet<String>,
}

impl DenyList {
    pub fn new<I, S>(developers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            developers: developers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, developer: &str) -> bool {
        self.developers.contains(developer)
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::new(EXCLUDED_DEVELOPERS.iter().copied())
    }
}

/// Inclusive lower bound of `window`, `None` when the window is unbounded.
pub fn window_start(window: TimeWindow, max_date: NaiveDate) -> Option<NaiveDate> {
    let days = window.lookback_days()?;
    max_date.checked_sub_days(Days::new(days))
}

/// Membership test for one time window, relative to the ledger's max date.
///
/// There is no upper bound: a record dated after `max_date` passes every
/// window.
#[derive(Debug, Clone, Copy)]
pub struct WindowFilter<'a> {
    start: Option<NaiveDate>,
    has_reference: bool,
    deny: &'a DenyList,
}

impl<'a> WindowFilter<'a> {
    /// Without a reference date nothing is in range.
    pub fn new(window: TimeWindow, max_date: Option<NaiveDate>, deny: &'a DenyList) -> Self {
        Self {
            start: max_date.and_then(|d| window_start(window, d)),
            has_reference: max_date.is_some(),
            deny,
        }
    }

    pub fn contains(&self, record: &CommitRecord) -> bool {
        if !self.has_reference || self.deny.contains(&record.developer) {
            return false;
        }
        match self.start {
            Some(start) => record.date >= start,
            None => true,
        }
    }
}

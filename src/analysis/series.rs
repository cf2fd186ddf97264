use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

use crate::analysis::ledger::parse_date;
use crate::error::Result;
use crate::types::ActiveDevPoint;
use crate::utils::select_range;

/// The canonical active developer time series, sorted ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveDevSeries {
    points: Vec<ActiveDevPoint>,
}

impl ActiveDevSeries {
    /// Sorts once; every consumer afterwards treats the points as ordered.
    pub fn new(mut points: Vec<ActiveDevPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Load a series from the raw `{ "YYYY-MM-DD": count }` JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Ok(Self::new(load_series(&raw)))
    }

    pub fn points(&self) -> &[ActiveDevPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last date of the series.
    pub fn domain(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Points visible for a chart slider position (0 shows everything).
    pub fn select(&self, position: f64) -> Vec<ActiveDevPoint> {
        match self.domain() {
            Some(domain) => select_range(&self.points, domain, position),
            None => Vec::new(),
        }
    }
}

/// Convert a date → count mapping into points.
///
/// Anything other than a JSON object yields an empty series. Keys that are
/// not dates and values that are not non-negative integers are skipped.
pub fn load_series(raw: &Value) -> Vec<ActiveDevPoint> {
    let Some(map) = raw.as_object() else {
        debug!("Active developer payload is not an object, using an empty series");
        return Vec::new();
    };

    let points: Vec<ActiveDevPoint> = map
        .iter()
        .filter_map(|(key, value)| {
            Some(ActiveDevPoint {
                date: parse_date(key)?,
                active_dev_count: value.as_u64()?,
            })
        })
        .collect();

    debug!(
        "Loaded {} active developer points ({} entries skipped)",
        points.len(),
        map.len() - points.len()
    );
    points
}

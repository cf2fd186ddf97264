use chrono::{Datelike, Days, NaiveDate};

use crate::types::ActiveDevPoint;

/// Whether `date` is the last day of its month.
pub fn is_month_end(date: NaiveDate) -> bool {
    date.checked_add_days(Days::new(1))
        .map(|next| next.month() != date.month())
        .unwrap_or(true)
}

/// Points that get a value label on the chart: every month end, plus the
/// final point of the series.
pub fn month_end_points(points: &[ActiveDevPoint]) -> Vec<ActiveDevPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);

    let last = sorted.len().saturating_sub(1);
    sorted
        .into_iter()
        .enumerate()
        .filter(|(i, p)| is_month_end(p.date) || *i == last)
        .map(|(_, p)| p)
        .collect()
}

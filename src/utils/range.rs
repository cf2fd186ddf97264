use chrono::NaiveDate;

use crate::types::ActiveDevPoint;

/// Slider positions are percentages.
pub const MAX_POSITION: f64 = 100.0;

/// Fraction of the domain a slider position keeps visible.
///
/// Position 0 keeps the whole domain and 100 keeps only its last day.
/// Non-finite positions are treated as 0.
pub fn visible_proportion(position: f64) -> f64 {
    let position = if position.is_finite() {
        position.clamp(0.0, MAX_POSITION)
    } else {
        0.0
    };
    1.0 - position / MAX_POSITION
}

/// Earliest visible instant, in days before `end` (may be fractional).
pub fn cutoff_offset_days(domain: (NaiveDate, NaiveDate), position: f64) -> f64 {
    let (start, end) = domain;
    let span = end.signed_duration_since(start).num_days().max(0) as f64;
    span * visible_proportion(position)
}

/// Points of `points` between the slider cutoff and `end`, both inclusive.
///
/// The cutoff is `end - (end - start) * proportion`; a point is kept when it
/// falls on or after the cutoff and no later than `end`.
pub fn select_range(
    points: &[ActiveDevPoint],
    domain: (NaiveDate, NaiveDate),
    position: f64,
) -> Vec<ActiveDevPoint> {
    let (_, end) = domain;
    let offset = cutoff_offset_days(domain, position);

    points
        .iter()
        .filter(|p| {
            let before_end = end.signed_duration_since(p.date).num_days();
            before_end >= 0 && before_end as f64 <= offset
        })
        .copied()
        .collect()
}

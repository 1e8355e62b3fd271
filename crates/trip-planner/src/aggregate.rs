//! Availability aggregation -- turns per-participant day lists into a ranked
//! list of date suggestions.
//!
//! Every day of the trip range gets exactly one suggestion, whether or not
//! anyone listed it. Each record then contributes one vote to every in-range
//! day it names. The result is ranked by vote count (highest first), with
//! ties broken chronologically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date_range::{parse_iso_date, DateRange};
use crate::model::Availability;

/// Aggregate availability for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSuggestion {
    /// The day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Number of listings of this day across all records.
    pub available_count: usize,
    /// `user_name` of each contributing record, in record order. A record
    /// that lists the same day twice appears twice.
    pub available_people: Vec<String>,
    /// `available_count` as a percentage of the number of records, in
    /// `0.0..=100.0` when every record lists a day at most once. `0.0` when
    /// there are no records.
    pub percentage: f64,
}

impl DateSuggestion {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            available_count: 0,
            available_people: Vec::new(),
            percentage: 0.0,
        }
    }
}

/// Rank every day of `range` by how many availability records include it.
///
/// The denominator for `percentage` is `records.len()`: the number of
/// responses, not the number of invited participants.
///
/// Dates that do not parse as canonical `YYYY-MM-DD`, or that fall outside
/// `range`, are skipped. The output always has `range.day_count()` entries,
/// sorted by `available_count` descending, then by date ascending.
pub fn aggregate(range: &DateRange, records: &[Availability]) -> Vec<DateSuggestion> {
    let mut suggestions: Vec<DateSuggestion> = range.days().map(DateSuggestion::empty).collect();

    let mut skipped = 0usize;
    for record in records {
        for raw in &record.dates {
            let Some(slot) = parse_iso_date(raw).and_then(|day| range.offset_of(day)) else {
                trace!(
                    availability_id = %record.id,
                    date = %raw,
                    "skipping date outside trip range or malformed"
                );
                skipped += 1;
                continue;
            };
            let suggestion = &mut suggestions[slot];
            suggestion.available_count += 1;
            suggestion.available_people.push(record.user_name.clone());
        }
    }

    if skipped > 0 {
        debug!(skipped, range = %range, "ignored dates that did not map onto the trip range");
    }

    let total = records.len();
    for suggestion in &mut suggestions {
        suggestion.percentage = percentage_of(suggestion.available_count, total);
    }

    // Days are generated in chronological order, so a stable sort on count
    // alone keeps ties ascending by date.
    suggestions.sort_by(|a, b| b.available_count.cmp(&a.available_count));
    suggestions
}

/// `count / total * 100`, defined as `0.0` when `total` is zero.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage_of(0, 0), 0.0);
        assert_eq!(percentage_of(3, 0), 0.0);
    }

    #[test]
    fn percentage_of_thirds() {
        let p = percentage_of(2, 3);
        assert!((p - 66.666_666).abs() < 1e-3);
    }
}

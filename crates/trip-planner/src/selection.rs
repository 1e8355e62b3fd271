//! A participant's in-progress pick of days for one trip.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date_range::{format_iso_date, parse_iso_date, DateRange};
use crate::error::{PlannerError, Result};

/// Sorted, duplicate-free set of days within a trip range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelection {
    range: DateRange,
    days: BTreeSet<NaiveDate>,
}

impl DateSelection {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            days: BTreeSet::new(),
        }
    }

    /// Seed a selection from previously submitted date strings. Malformed and
    /// out-of-range entries are dropped.
    pub fn from_dates<S: AsRef<str>>(range: DateRange, dates: &[S]) -> Self {
        let days = dates
            .iter()
            .filter_map(|s| parse_iso_date(s.as_ref()))
            .filter(|day| range.contains(*day))
            .collect();
        Self { range, days }
    }

    /// Select `day` if it is not selected, deselect it otherwise. Returns
    /// whether the day is selected afterwards.
    ///
    /// # Errors
    /// Returns `PlannerError::DateOutsideRange` for a day outside the trip.
    pub fn toggle(&mut self, day: NaiveDate) -> Result<bool> {
        if !self.range.contains(day) {
            return Err(PlannerError::DateOutsideRange(day));
        }
        if self.days.remove(&day) {
            Ok(false)
        } else {
            self.days.insert(day);
            Ok(true)
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Selected days as `YYYY-MM-DD` strings, ascending.
    pub fn to_date_strings(&self) -> Vec<String> {
        self.days.iter().copied().map(format_iso_date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::parse("2024-07-01", "2024-07-05").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = DateSelection::new(range());
        assert!(sel.toggle(d("2024-07-03")).unwrap());
        assert!(sel.contains(d("2024-07-03")));
        assert!(!sel.toggle(d("2024-07-03")).unwrap());
        assert!(sel.is_empty());
    }

    #[test]
    fn stays_sorted_regardless_of_pick_order() {
        let mut sel = DateSelection::new(range());
        for day in ["2024-07-04", "2024-07-01", "2024-07-03"] {
            sel.toggle(d(day)).unwrap();
        }
        assert_eq!(
            sel.to_date_strings(),
            vec!["2024-07-01", "2024-07-03", "2024-07-04"]
        );
    }

    #[test]
    fn toggle_outside_range_fails() {
        let mut sel = DateSelection::new(range());
        assert_eq!(
            sel.toggle(d("2024-07-06")),
            Err(PlannerError::DateOutsideRange(d("2024-07-06")))
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn from_dates_drops_bad_entries_and_duplicates() {
        let sel = DateSelection::from_dates(
            range(),
            &["2024-07-02", "2024-07-02", "nope", "2024-08-01", "2024-07-01"],
        );
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.to_date_strings(), vec!["2024-07-01", "2024-07-02"]);
    }
}

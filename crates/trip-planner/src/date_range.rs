//! Inclusive calendar-day ranges.
//!
//! Trip dates carry no time or timezone component. A range covers every day
//! from `start` to `end` inclusive, and an inverted range cannot be built.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// The only accepted textual date layout.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated wire shape, checked by [`DateRange::new`] on deserialization.
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PlannerError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidDateRange` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(PlannerError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Parse both bounds from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidDate` for a malformed bound and
    /// `PlannerError::InvalidDateRange` when the bounds are inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start =
            parse_iso_date(start).ok_or_else(|| PlannerError::InvalidDate(start.to_string()))?;
        let end = parse_iso_date(end).ok_or_else(|| PlannerError::InvalidDate(end.to_string()))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both ends. Always at least 1.
    pub fn day_count(&self) -> usize {
        // Non-negative by construction.
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Zero-based position of `day` within the range, or `None` outside it.
    pub fn offset_of(&self, day: NaiveDate) -> Option<usize> {
        if self.contains(day) {
            Some((day - self.start).num_days() as usize)
        } else {
            None
        }
    }

    /// Every day from `start` to `end` inclusive, in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start.format(ISO_DATE_FORMAT),
            self.end.format(ISO_DATE_FORMAT)
        )
    }
}

/// Parse a canonical, zero-padded `YYYY-MM-DD` string.
///
/// Text that chrono would accept but that does not round-trip to the same
/// string (`2024-7-1`, surrounding whitespace) is rejected, so comparing the
/// parsed dates agrees with comparing the strings.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).ok()?;
    (format_iso_date(date) == s).then_some(date)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

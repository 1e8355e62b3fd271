//! Error types for trip-planner operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{AvailabilityId, TripId, UserId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {0} is outside the trip's date range")]
    DateOutsideRange(NaiveDate),

    #[error("Good-option threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),

    #[error("No dates selected")]
    EmptySelection,

    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    #[error("Availability not found: {0}")]
    AvailabilityNotFound(AvailabilityId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Only the trip creator can update trip {0}")]
    NotTripCreator(TripId),

    /// Failure reported by a persistence backend.
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

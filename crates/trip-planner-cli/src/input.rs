//! Input document accepted by every subcommand.
//!
//! ```json
//! {
//!   "trip": { "name": "Coast road", "dateRange": { "start": "2024-07-01", "end": "2024-07-03" } },
//!   "availabilities": [
//!     { "userName": "Ada", "dates": ["2024-07-01", "2024-07-02"] },
//!     { "userName": "Bo",  "dates": ["2024-07-01"] }
//!   ]
//! }
//! ```
//!
//! Ids and timestamps are optional; exported database documents that carry
//! them are accepted as-is.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use trip_planner::model::{Availability, AvailabilityId, TripId, UserId};
use trip_planner::DateRange;

#[derive(Debug, Deserialize)]
pub struct PlanDocument {
    pub trip: TripInput,
    #[serde(default)]
    pub availabilities: Vec<AvailabilityInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub date_range: DateRange,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub user_name: String,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlanDocument {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse trip document")
    }

    pub fn trip_id(&self) -> TripId {
        self.trip
            .id
            .as_deref()
            .map(TripId::from)
            .unwrap_or_else(|| TripId::new("trip"))
    }

    pub fn trip_label(&self) -> &str {
        self.trip.name.as_deref().unwrap_or("Untitled trip")
    }

    /// Materialize the records, filling in missing ids from their position.
    pub fn records(&self) -> Vec<Availability> {
        let trip_id = self.trip_id();
        let now = Utc::now();
        self.availabilities
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let created_at = input.created_at.unwrap_or(now);
                Availability {
                    id: input
                        .id
                        .as_deref()
                        .map(AvailabilityId::from)
                        .unwrap_or_else(|| AvailabilityId::new(format!("response-{}", i + 1))),
                    trip_id: trip_id.clone(),
                    user_id: input
                        .user_id
                        .as_deref()
                        .map(UserId::from)
                        .unwrap_or_else(|| UserId::new(format!("user-{}", i + 1))),
                    user_name: input.user_name.clone(),
                    dates: input.dates.clone(),
                    created_at,
                    updated_at: input.updated_at.unwrap_or(created_at),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_gets_generated_ids() {
        let doc = PlanDocument::parse(
            r#"{"trip":{"dateRange":{"start":"2024-07-01","end":"2024-07-02"}},
                "availabilities":[{"userName":"Ada","dates":["2024-07-01"]}]}"#,
        )
        .unwrap();

        assert_eq!(doc.trip_label(), "Untitled trip");
        let records = doc.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "response-1");
        assert_eq!(records[0].user_id.as_str(), "user-1");
        assert_eq!(records[0].trip_id.as_str(), "trip");
    }

    #[test]
    fn inverted_range_is_a_parse_error() {
        let err = PlanDocument::parse(
            r#"{"trip":{"dateRange":{"start":"2024-07-05","end":"2024-07-01"}}}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("before start"));
    }
}

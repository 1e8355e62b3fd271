//! Derived view of a single trip for a given viewer.
//!
//! Combines the trip, its availability records, and the viewer session into
//! the data a trip page renders: ranked suggestions, the two recommendation
//! tiers, the viewer's own response, and who created the trip.

use serde::Serialize;

use crate::aggregate::DateSuggestion;
use crate::model::{Availability, Session, Trip, UserId};
use crate::selection::DateSelection;
use crate::suggestions::{RankedSuggestions, SuggestionPolicy};

/// Creator label shown to the creator themself.
pub const CREATOR_SELF_LABEL: &str = "you";
/// Creator label when the creator has not responded yet.
pub const UNKNOWN_CREATOR_LABEL: &str = "Unknown";
/// Response label for the viewer's own records.
pub const OWN_RESPONSE_LABEL: &str = "You";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub user_id: UserId,
    pub label: String,
    pub dates: Vec<String>,
    pub date_count: usize,
}

#[derive(Debug, Clone)]
pub struct TripOverview<'a> {
    pub trip: &'a Trip,
    pub ranked: RankedSuggestions,
    pub policy: SuggestionPolicy,
    records: &'a [Availability],
    session: &'a Session,
}

impl<'a> TripOverview<'a> {
    pub fn build(
        trip: &'a Trip,
        records: &'a [Availability],
        session: &'a Session,
        policy: SuggestionPolicy,
    ) -> Self {
        Self {
            trip,
            ranked: RankedSuggestions::compute(&trip.date_range, records),
            policy,
            records,
            session,
        }
    }

    pub fn suggestions(&self) -> &[DateSuggestion] {
        &self.ranked.suggestions
    }

    pub fn perfect_matches(&self) -> Vec<&DateSuggestion> {
        self.ranked.perfect_matches()
    }

    pub fn good_options(&self) -> Vec<&DateSuggestion> {
        self.ranked.good_options(&self.policy)
    }

    pub fn viewer_is_creator(&self) -> bool {
        self.trip.creator_id == self.session.user_id
    }

    /// The first record submitted by the viewer, in record order.
    pub fn viewer_response(&self) -> Option<&'a Availability> {
        self.records
            .iter()
            .find(|r| r.user_id == self.session.user_id)
    }

    /// The viewer's previous picks, ready to edit.
    pub fn viewer_selection(&self) -> DateSelection {
        match self.viewer_response() {
            Some(record) => DateSelection::from_dates(self.trip.date_range, record.dates.as_slice()),
            None => DateSelection::new(self.trip.date_range),
        }
    }

    /// `"you"` for the creator, otherwise the creator's name as recorded on
    /// their availability, otherwise `"Unknown"`.
    pub fn creator_label(&self) -> &str {
        if self.viewer_is_creator() {
            return CREATOR_SELF_LABEL;
        }
        self.records
            .iter()
            .find(|r| r.user_id == self.trip.creator_id)
            .map(|r| r.user_name.as_str())
            .unwrap_or(UNKNOWN_CREATOR_LABEL)
    }

    pub fn responses(&self) -> Vec<ResponseSummary> {
        self.records
            .iter()
            .map(|r| ResponseSummary {
                user_id: r.user_id.clone(),
                label: if r.user_id == self.session.user_id {
                    OWN_RESPONSE_LABEL.to_string()
                } else {
                    r.user_name.clone()
                },
                dates: r.dates.clone(),
                date_count: r.dates.len(),
            })
            .collect()
    }
}

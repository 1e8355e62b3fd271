//! Trips, availability records, users, and the viewer session.
//!
//! Field names serialize in camelCase so the JSON shape matches what the
//! document database and the web front end exchange (`creatorId`,
//! `dateRange`, `userName`, ...).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_range::DateRange;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// A fresh random identifier.
            pub fn new_random() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Trip`].
    TripId
);
string_id!(
    /// Identifier of a user, as issued by the auth provider.
    UserId
);
string_id!(
    /// Identifier of an [`Availability`] record.
    AvailabilityId
);

/// Display name used when the submitting user has none.
pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A dated planning unit owned by its creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub creator_id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_range: DateRange,
    /// Invited user ids, unique, in the order they were added.
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn has_participant(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }

    /// Add `user` to the participant list. Returns `false` if already present.
    pub fn add_participant(&mut self, user: UserId) -> bool {
        if self.has_participant(&user) {
            return false;
        }
        self.participants.push(user);
        true
    }
}

/// Fields supplied when creating a trip; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub creator_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub date_range: DateRange,
    pub participants: Vec<UserId>,
}

/// Partial update of a trip. `None` leaves a field unchanged.
///
/// The date range is editable at any time, including after availability has
/// been collected; records then simply stop counting days that fell out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub date_range: Option<DateRange>,
    pub participants: Option<Vec<UserId>>,
}

/// One participant's submitted days for one trip.
///
/// `user_name` is a snapshot taken at submission time. `dates` holds the
/// strings exactly as submitted; anything that is not a canonical
/// `YYYY-MM-DD` day inside the trip range is ignored by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: AvailabilityId,
    pub trip_id: TripId,
    pub user_id: UserId,
    pub user_name: String,
    pub dates: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAvailability {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub user_name: String,
    pub dates: Vec<String>,
}

/// The signed-in viewer, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<UserId>, display_name: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
        }
    }

    /// Name stamped onto availability records this viewer submits.
    pub fn submitter_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ANONYMOUS_NAME,
        }
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

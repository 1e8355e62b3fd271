//! Persistence boundary for trips, users, and availability records.
//!
//! [`TripStore`] mirrors the operations the application performs against its
//! document database. [`InMemoryStore`] is a complete implementation used by
//! the CLI and the tests; production deployments plug in their own backend.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::model::{
    Availability, AvailabilityId, NewAvailability, NewTrip, Session, Trip, TripId, TripUpdate,
    UserId, UserProfile,
};
use crate::selection::DateSelection;

/// What happens when a user submits availability for a trip they already
/// answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPolicy {
    /// Every submission becomes a new record. Older records keep counting.
    #[default]
    Append,
    /// The user's existing record for the trip is overwritten in place.
    ReplaceExisting,
}

pub trait TripStore {
    fn create_user(&mut self, id: UserId, email: &str, name: &str) -> Result<UserProfile>;

    fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>>;

    /// Persist a new trip. The creator is always a participant.
    fn create_trip(&mut self, new_trip: NewTrip) -> Result<Trip>;

    fn get_trip(&self, id: &TripId) -> Result<Option<Trip>>;

    /// Trips listing `user` as a participant, newest first.
    fn user_trips(&self, user: &UserId) -> Result<Vec<Trip>>;

    fn update_trip(&mut self, id: &TripId, update: TripUpdate) -> Result<Trip>;

    fn set_availability(&mut self, new_availability: NewAvailability) -> Result<Availability>;

    /// All availability records of a trip, newest first.
    fn trip_availabilities(&self, trip: &TripId) -> Result<Vec<Availability>>;

    fn update_availability(&mut self, id: &AvailabilityId, dates: Vec<String>) -> Result<Availability>;
}

/// Submit the viewer's selection for `trip_id`.
///
/// # Errors
/// Returns `PlannerError::EmptySelection` for an empty selection and
/// `PlannerError::TripNotFound` when the trip does not exist.
pub fn submit_availability<S: TripStore + ?Sized>(
    store: &mut S,
    session: &Session,
    trip_id: &TripId,
    selection: &DateSelection,
) -> Result<Availability> {
    if selection.is_empty() {
        return Err(PlannerError::EmptySelection);
    }
    if store.get_trip(trip_id)?.is_none() {
        return Err(PlannerError::TripNotFound(trip_id.clone()));
    }
    store.set_availability(NewAvailability {
        trip_id: trip_id.clone(),
        user_id: session.user_id.clone(),
        user_name: session.submitter_name().to_string(),
        dates: selection.to_date_strings(),
    })
}

/// Apply `update` on behalf of the viewer, who must be the trip creator.
pub fn update_trip_as<S: TripStore + ?Sized>(
    store: &mut S,
    session: &Session,
    trip_id: &TripId,
    update: TripUpdate,
) -> Result<Trip> {
    let trip = store
        .get_trip(trip_id)?
        .ok_or_else(|| PlannerError::TripNotFound(trip_id.clone()))?;
    if trip.creator_id != session.user_id {
        return Err(PlannerError::NotTripCreator(trip_id.clone()));
    }
    store.update_trip(trip_id, update)
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct InMemoryStore {
    policy: SubmissionPolicy,
    clock: Clock,
    users: HashMap<UserId, UserProfile>,
    // Vecs keep insertion order, which is also creation order.
    trips: Vec<Trip>,
    availabilities: Vec<Availability>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("policy", &self.policy)
            .field("users", &self.users.len())
            .field("trips", &self.trips.len())
            .field("availabilities", &self.availabilities.len())
            .finish()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_policy(SubmissionPolicy::default())
    }

    pub fn with_policy(policy: SubmissionPolicy) -> Self {
        Self {
            policy,
            clock: Box::new(Utc::now),
            users: HashMap::new(),
            trips: Vec::new(),
            availabilities: Vec::new(),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl TripStore for InMemoryStore {
    fn create_user(&mut self, id: UserId, email: &str, name: &str) -> Result<UserProfile> {
        let profile = UserProfile {
            id: id.clone(),
            email: email.to_string(),
            name: name.to_string(),
            created_at: self.now(),
        };
        self.users.insert(id, profile.clone());
        Ok(profile)
    }

    fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>> {
        Ok(self.users.get(id).cloned())
    }

    fn create_trip(&mut self, new_trip: NewTrip) -> Result<Trip> {
        let now = self.now();
        let mut trip = Trip {
            id: TripId::new_random(),
            creator_id: new_trip.creator_id.clone(),
            name: new_trip.name,
            description: new_trip.description,
            date_range: new_trip.date_range,
            participants: Vec::with_capacity(new_trip.participants.len() + 1),
            created_at: now,
            updated_at: now,
        };
        trip.add_participant(new_trip.creator_id);
        for user in new_trip.participants {
            trip.add_participant(user);
        }
        info!(trip_id = %trip.id, range = %trip.date_range, "created trip");
        self.trips.push(trip.clone());
        Ok(trip)
    }

    fn get_trip(&self, id: &TripId) -> Result<Option<Trip>> {
        Ok(self.trips.iter().find(|t| &t.id == id).cloned())
    }

    fn user_trips(&self, user: &UserId) -> Result<Vec<Trip>> {
        Ok(self
            .trips
            .iter()
            .rev()
            .filter(|t| t.has_participant(user))
            .cloned()
            .collect())
    }

    fn update_trip(&mut self, id: &TripId, update: TripUpdate) -> Result<Trip> {
        let now = self.now();
        let trip = self
            .trips
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| PlannerError::TripNotFound(id.clone()))?;

        if let Some(name) = update.name {
            trip.name = name;
        }
        if let Some(description) = update.description {
            trip.description = description;
        }
        if let Some(range) = update.date_range {
            trip.date_range = range;
        }
        if let Some(participants) = update.participants {
            let creator = trip.creator_id.clone();
            trip.participants.clear();
            trip.add_participant(creator);
            for user in participants {
                trip.add_participant(user);
            }
        }
        trip.updated_at = now;
        info!(trip_id = %trip.id, "updated trip");
        Ok(trip.clone())
    }

    fn set_availability(&mut self, new_availability: NewAvailability) -> Result<Availability> {
        let now = self.now();

        if self.policy == SubmissionPolicy::ReplaceExisting {
            if let Some(existing) = self.availabilities.iter_mut().find(|a| {
                a.trip_id == new_availability.trip_id && a.user_id == new_availability.user_id
            }) {
                existing.user_name = new_availability.user_name;
                existing.dates = new_availability.dates;
                existing.updated_at = now;
                info!(availability_id = %existing.id, trip_id = %existing.trip_id, "replaced availability");
                return Ok(existing.clone());
            }
        }

        let record = Availability {
            id: AvailabilityId::new_random(),
            trip_id: new_availability.trip_id,
            user_id: new_availability.user_id,
            user_name: new_availability.user_name,
            dates: new_availability.dates,
            created_at: now,
            updated_at: now,
        };
        info!(availability_id = %record.id, trip_id = %record.trip_id, "stored availability");
        self.availabilities.push(record.clone());
        Ok(record)
    }

    fn trip_availabilities(&self, trip: &TripId) -> Result<Vec<Availability>> {
        Ok(self
            .availabilities
            .iter()
            .rev()
            .filter(|a| &a.trip_id == trip)
            .cloned()
            .collect())
    }

    fn update_availability(&mut self, id: &AvailabilityId, dates: Vec<String>) -> Result<Availability> {
        let now = self.now();
        let record = self
            .availabilities
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| PlannerError::AvailabilityNotFound(id.clone()))?;
        record.dates = dates;
        record.updated_at = now;
        Ok(record.clone())
    }
}

//! # trip-planner
//!
//! Group trip scheduling core: participants submit the days they can make it,
//! and the planner ranks every day of the trip by how many of them are free.
//!
//! The aggregation is a pure function over in-memory data. Fetching trips and
//! availability records is the job of a [`store::TripStore`] implementation;
//! rendering is the job of whatever sits on top (the `tripplan` CLI, the WASM
//! bindings, a web front end).
//!
//! ## Modules
//!
//! - [`date_range`] — Inclusive calendar-day ranges and ISO date parsing
//! - [`model`] — Trips, availability records, users, and the viewer session
//! - [`aggregate`] — Availability records → ranked [`DateSuggestion`]s
//! - [`suggestions`] — Perfect-match / good-option classification
//! - [`selection`] — A participant's in-progress date picks
//! - [`overview`] — Everything a trip page needs, derived in one pass
//! - [`store`] — Persistence boundary and an in-memory implementation
//! - [`error`] — Error types

pub mod aggregate;
pub mod date_range;
pub mod error;
pub mod model;
pub mod overview;
pub mod selection;
pub mod store;
pub mod suggestions;

pub use aggregate::{aggregate, DateSuggestion};
pub use date_range::{parse_iso_date, DateRange};
pub use error::PlannerError;
pub use model::{Availability, AvailabilityId, Session, Trip, TripId, UserId, UserProfile};
pub use overview::TripOverview;
pub use selection::DateSelection;
pub use store::{submit_availability, update_trip_as, InMemoryStore, SubmissionPolicy, TripStore};
pub use suggestions::{good_options, perfect_matches, RankedSuggestions, SuggestionPolicy};

//! Tests for the per-viewer trip overview.

use chrono::{NaiveDate, TimeZone, Utc};
use trip_planner::model::{Availability, AvailabilityId, Session, Trip, TripId, UserId};
use trip_planner::{DateRange, SuggestionPolicy, TripOverview};

fn trip(creator: &str) -> Trip {
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    Trip {
        id: TripId::new("trip-1"),
        creator_id: UserId::new(creator),
        name: "Coast road".to_string(),
        description: Some("Three days, one car".to_string()),
        date_range: DateRange::parse("2024-07-01", "2024-07-03").unwrap(),
        participants: vec![UserId::new(creator), UserId::new("bob"), UserId::new("cy")],
        created_at: at,
        updated_at: at,
    }
}

fn record(user_id: &str, name: &str, dates: &[&str]) -> Availability {
    let at = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
    Availability {
        id: AvailabilityId::new(format!("a-{user_id}")),
        trip_id: TripId::new("trip-1"),
        user_id: UserId::new(user_id),
        user_name: name.to_string(),
        dates: dates.iter().map(|d| d.to_string()).collect(),
        created_at: at,
        updated_at: at,
    }
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn creator_label_from_viewer_perspective() {
    let trip = trip("alice");
    let records = vec![
        record("bob", "Bob", &["2024-07-01"]),
        record("alice", "Alice", &["2024-07-01"]),
    ];

    let as_alice = Session::new("alice", Some("Alice".to_string()));
    let overview = TripOverview::build(&trip, &records, &as_alice, SuggestionPolicy::default());
    assert!(overview.viewer_is_creator());
    assert_eq!(overview.creator_label(), "you");

    let as_bob = Session::new("bob", Some("Bob".to_string()));
    let overview = TripOverview::build(&trip, &records, &as_bob, SuggestionPolicy::default());
    assert!(!overview.viewer_is_creator());
    assert_eq!(overview.creator_label(), "Alice");
}

#[test]
fn creator_without_response_is_unknown() {
    let trip = trip("alice");
    let records = vec![record("bob", "Bob", &["2024-07-01"])];
    let viewer = Session::new("bob", None);

    let overview = TripOverview::build(&trip, &records, &viewer, SuggestionPolicy::default());
    assert_eq!(overview.creator_label(), "Unknown");
}

#[test]
fn viewer_response_and_selection() {
    let trip = trip("alice");
    let records = vec![
        record("bob", "Bob", &["2024-07-03", "2024-07-01", "2024-09-09"]),
        record("cy", "Cy", &["2024-07-02"]),
    ];
    let viewer = Session::new("bob", Some("Bob".to_string()));

    let overview = TripOverview::build(&trip, &records, &viewer, SuggestionPolicy::default());
    assert_eq!(
        overview.viewer_response().map(|r| &r.id),
        Some(&AvailabilityId::new("a-bob"))
    );
    assert_eq!(
        overview.viewer_selection().to_date_strings(),
        vec!["2024-07-01", "2024-07-03"]
    );

    let newcomer = Session::new("dee", None);
    let overview = TripOverview::build(&trip, &records, &newcomer, SuggestionPolicy::default());
    assert!(overview.viewer_response().is_none());
    assert!(overview.viewer_selection().is_empty());
}

#[test]
fn tiers_and_responses() {
    let trip = trip("alice");
    let records = vec![
        record("alice", "Alice", &["2024-07-01", "2024-07-02"]),
        record("bob", "Bob", &["2024-07-01", "2024-07-02"]),
        record("cy", "Cy", &["2024-07-01", "2024-07-02"]),
        record("dee", "Dee", &["2024-07-01"]),
    ];
    let viewer = Session::new("bob", Some("Bob".to_string()));
    let overview = TripOverview::build(&trip, &records, &viewer, SuggestionPolicy::default());

    assert_eq!(overview.suggestions().len(), 3);
    let perfect: Vec<NaiveDate> = overview.perfect_matches().iter().map(|s| s.date).collect();
    assert_eq!(perfect, vec![day("2024-07-01")]);
    let good: Vec<NaiveDate> = overview.good_options().iter().map(|s| s.date).collect();
    assert_eq!(good, vec![day("2024-07-02")]);

    let responses = overview.responses();
    let labels: Vec<&str> = responses.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Alice", "You", "Cy", "Dee"]);
    assert_eq!(responses[0].date_count, 2);
    assert_eq!(responses[3].date_count, 1);
}

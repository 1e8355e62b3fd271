//! WASM bindings for trip-planner.
//!
//! Exposes availability aggregation and suggestion classification to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON
//! strings in the same camelCase shape the web front end stores.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p trip-planner-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/trip-planner-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/trip_planner_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trip_planner::model::{Availability, AvailabilityId, TripId, UserId};
use trip_planner::{DateRange, DateSuggestion, RankedSuggestions, SuggestionPolicy};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// An availability record as sent from JavaScript. Only `userName` and
/// `dates` affect the result; the rest is accepted so stored documents can
/// be passed through unchanged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityInput {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    trip_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    user_name: String,
    #[serde(default)]
    dates: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifiedDto<'a> {
    total_responses: usize,
    suggestions: &'a [DateSuggestion],
    perfect_matches: Vec<&'a DateSuggestion>,
    good_options: Vec<&'a DateSuggestion>,
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_range(json: &str) -> Result<DateRange, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid date range JSON: {}", e))
}

fn parse_records(json: &str) -> Result<Vec<Availability>, String> {
    let inputs: Vec<AvailabilityInput> = serde_json::from_str(json)
        .map_err(|e| format!("Invalid availabilities JSON: {}", e))?;

    // Timestamps do not influence aggregation; `Utc::now` is unavailable on
    // wasm32-unknown-unknown without extra features.
    let epoch = DateTime::<Utc>::default();
    Ok(inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| Availability {
            id: AvailabilityId::new(input.id.unwrap_or_else(|| format!("response-{}", i + 1))),
            trip_id: TripId::new(input.trip_id.unwrap_or_default()),
            user_id: UserId::new(input.user_id.unwrap_or_else(|| format!("user-{}", i + 1))),
            user_name: input.user_name,
            dates: input.dates,
            created_at: epoch,
            updated_at: epoch,
        })
        .collect())
}

fn aggregate_json(range_json: &str, availabilities_json: &str) -> Result<String, String> {
    let range = parse_range(range_json)?;
    let records = parse_records(availabilities_json)?;
    let suggestions = trip_planner::aggregate(&range, &records);
    serde_json::to_string(&suggestions).map_err(|e| format!("Serialization error: {}", e))
}

fn classify_json(
    range_json: &str,
    availabilities_json: &str,
    good_threshold: Option<f64>,
) -> Result<String, String> {
    let policy = match good_threshold {
        Some(t) => SuggestionPolicy::new(t).map_err(|e| e.to_string())?,
        None => SuggestionPolicy::default(),
    };
    let range = parse_range(range_json)?;
    let records = parse_records(availabilities_json)?;
    let ranked = RankedSuggestions::compute(&range, &records);

    let dto = ClassifiedDto {
        total_responses: ranked.total_responses,
        suggestions: &ranked.suggestions,
        perfect_matches: ranked.perfect_matches(),
        good_options: ranked.good_options(&policy),
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Rank every day of a trip by participant availability.
///
/// `range_json` is `{"start": "YYYY-MM-DD", "end": "YYYY-MM-DD"}`;
/// `availabilities_json` is an array of `{userName, dates}` objects. Returns
/// a JSON array of `{date, availableCount, availablePeople, percentage}`.
#[wasm_bindgen(js_name = "aggregateAvailability")]
pub fn aggregate_availability(range_json: &str, availabilities_json: &str) -> Result<String, JsValue> {
    aggregate_json(range_json, availabilities_json).map_err(|e| JsValue::from_str(&e))
}

/// Rank days and split out perfect matches and good options.
///
/// `good_threshold` defaults to 75 when omitted. Returns a JSON object with
/// `totalResponses`, `suggestions`, `perfectMatches`, and `goodOptions`.
#[wasm_bindgen(js_name = "classifySuggestions")]
pub fn classify_suggestions(
    range_json: &str,
    availabilities_json: &str,
    good_threshold: Option<f64>,
) -> Result<String, JsValue> {
    classify_json(range_json, availabilities_json, good_threshold).map_err(|e| JsValue::from_str(&e))
}

//! Classification of ranked suggestions into perfect matches and good options.
//!
//! A *perfect match* is a day every responder can make (and there is at least
//! one responder). A *good option* reaches the configured coverage threshold
//! without being a perfect match. The two sets never overlap.

use serde::Serialize;

use crate::aggregate::{aggregate, DateSuggestion};
use crate::date_range::DateRange;
use crate::error::{PlannerError, Result};
use crate::model::Availability;

/// Tunables for classifying suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPolicy {
    /// Minimum `percentage` for a good option.
    pub good_threshold: f64,
}

impl SuggestionPolicy {
    pub const DEFAULT_GOOD_THRESHOLD: f64 = 75.0;

    /// # Errors
    /// Returns `PlannerError::InvalidThreshold` unless `good_threshold` is a
    /// number in `0.0..=100.0`.
    pub fn new(good_threshold: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&good_threshold) {
            return Err(PlannerError::InvalidThreshold(good_threshold));
        }
        Ok(Self { good_threshold })
    }
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            good_threshold: Self::DEFAULT_GOOD_THRESHOLD,
        }
    }
}

/// Days where `available_count == total_responses` and `total_responses > 0`.
pub fn perfect_matches(suggestions: &[DateSuggestion], total_responses: usize) -> Vec<&DateSuggestion> {
    suggestions
        .iter()
        .filter(|s| is_perfect(s, total_responses))
        .collect()
}

/// Days at or above the policy threshold that are not perfect matches.
pub fn good_options<'a>(
    suggestions: &'a [DateSuggestion],
    total_responses: usize,
    policy: &SuggestionPolicy,
) -> Vec<&'a DateSuggestion> {
    suggestions
        .iter()
        .filter(|s| s.percentage >= policy.good_threshold && s.available_count < total_responses)
        .collect()
}

fn is_perfect(suggestion: &DateSuggestion, total_responses: usize) -> bool {
    suggestion.available_count > 0 && suggestion.available_count == total_responses
}

/// Aggregated suggestions together with the response count they were
/// computed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSuggestions {
    pub suggestions: Vec<DateSuggestion>,
    pub total_responses: usize,
}

impl RankedSuggestions {
    pub fn compute(range: &DateRange, records: &[Availability]) -> Self {
        Self {
            suggestions: aggregate(range, records),
            total_responses: records.len(),
        }
    }

    pub fn perfect_matches(&self) -> Vec<&DateSuggestion> {
        perfect_matches(&self.suggestions, self.total_responses)
    }

    pub fn good_options(&self, policy: &SuggestionPolicy) -> Vec<&DateSuggestion> {
        good_options(&self.suggestions, self.total_responses, policy)
    }

    /// The top-ranked day, if anyone is available on it.
    pub fn best(&self) -> Option<&DateSuggestion> {
        self.suggestions.first().filter(|s| s.available_count > 0)
    }

    pub fn has_recommendations(&self, policy: &SuggestionPolicy) -> bool {
        !self.perfect_matches().is_empty() || !self.good_options(policy).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_rejects_out_of_range_thresholds() {
        assert!(SuggestionPolicy::new(0.0).is_ok());
        assert!(SuggestionPolicy::new(100.0).is_ok());
        assert_eq!(
            SuggestionPolicy::new(100.5),
            Err(PlannerError::InvalidThreshold(100.5))
        );
        assert!(SuggestionPolicy::new(-1.0).is_err());
        assert!(SuggestionPolicy::new(f64::NAN).is_err());
    }

    #[test]
    fn default_threshold_is_75() {
        assert_eq!(SuggestionPolicy::default().good_threshold, 75.0);
    }
}

//! Template contexts built from session state

use serde::Serialize;
use tracing::debug;

use crate::domain::{PreferenceSet, Turn, label_of, render_transcript};

/// Placeholder used instead of search results when revising suggestions
pub const OMITTED_SEARCH_RESULTS: &str = "[Previous search results omitted]";

/// Web-search query for a preference set
pub fn search_query(prefs: &PreferenceSet) -> String {
    debug!(destination = %prefs.destination, "search_query: called");
    format!(
        "Top tourist attractions and activities in {} for {} trip with {} interests and {} budget",
        prefs.destination.trim(),
        label_of(prefs.purpose),
        prefs.interests_label(),
        label_of(prefs.budget)
    )
}

/// Context for the `suggest` template
#[derive(Debug, Clone, Serialize)]
pub struct SuggestContext {
    pub budget: String,
    pub duration: String,
    pub destination: String,
    pub purpose: String,
    /// `"<interests> with <mobility> mobility concerns"`
    pub preferences: String,
    pub search_results: String,
}

impl SuggestContext {
    pub fn new(prefs: &PreferenceSet, search_results: impl Into<String>) -> Self {
        Self {
            budget: label_of(prefs.budget),
            duration: label_of(prefs.duration),
            destination: prefs.destination.trim().to_string(),
            purpose: label_of(prefs.purpose),
            preferences: format!(
                "{} with {} mobility concerns",
                prefs.interests_label(),
                label_of(prefs.mobility_concern)
            ),
            search_results: search_results.into(),
        }
    }
}

/// Context for the `revise` template
#[derive(Debug, Clone, Serialize)]
pub struct ReviseContext {
    /// The rendered `suggest` prompt with search results omitted
    pub suggest: String,
    pub current_proposal: String,
    pub recent_conversation: String,
    pub requested_changes: String,
}

impl ReviseContext {
    pub fn new(suggest: String, current_proposal: &str, recent: &[Turn], requested_changes: &str) -> Self {
        Self {
            suggest,
            current_proposal: current_proposal.to_string(),
            recent_conversation: render_transcript(recent),
            requested_changes: requested_changes.to_string(),
        }
    }
}

/// Context for the `itinerary` template
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryContext {
    pub budget: String,
    pub duration: String,
    pub destination: String,
    pub purpose: String,
    pub interests: String,
    pub approved_suggestions: String,
    pub dietary_preferences: String,
    pub mobility_concerns: String,
    pub accommodation_preferences: String,
    pub start_time: String,
    pub end_time: String,
    pub starting_location: String,
}

impl ItineraryContext {
    pub fn new(prefs: &PreferenceSet, approved_suggestions: &str) -> Self {
        Self {
            budget: label_of(prefs.budget),
            duration: label_of(prefs.duration),
            destination: prefs.destination.trim().to_string(),
            purpose: label_of(prefs.purpose),
            interests: prefs.interests_label(),
            approved_suggestions: approved_suggestions.to_string(),
            dietary_preferences: label_of(prefs.dietary_preference),
            mobility_concerns: label_of(prefs.mobility_concern),
            accommodation_preferences: label_of(prefs.accommodation_preference),
            start_time: prefs.start_time.to_string(),
            end_time: prefs.end_time.to_string(),
            starting_location: prefs.starting_location.trim().to_string(),
        }
    }
}

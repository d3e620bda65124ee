//! Degraded result for routes the provider cannot resolve.

use super::types::{EnrichedStep, RouteResult, UNKNOWN};

/// User-facing explanation for a missing route.
pub fn fallback_message(destination: &str) -> String {
    format!(
        "I couldn't find specific directions to '{}'. Please try a more specific location or check the spelling.",
        destination
    )
}

/// A structurally complete result carrying a single explanatory step.
///
/// The narrative repeats the step text so speech synthesis always has input.
pub fn build_fallback(origin: &str, destination: &str) -> RouteResult {
    let message = fallback_message(destination);

    RouteResult {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance: UNKNOWN.to_string(),
        duration: UNKNOWN.to_string(),
        steps: vec![EnrichedStep {
            step_number: 1,
            instruction: message.clone(),
            distance: String::new(),
            duration: String::new(),
            travel_mode: String::new(),
            landmarks: Vec::new(),
        }],
        narrative: message,
        includes_landmarks: false,
        landmark_count: 0,
        is_fallback: true,
    }
}

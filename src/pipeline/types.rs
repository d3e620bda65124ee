//! Pipeline data types.

use crate::provider::GeoPoint;
use serde::{Deserialize, Serialize};

use super::normalize::{is_current_location, CURRENT_LOCATION};

/// Placeholder used when the provider gives no route-level distance or duration.
pub const UNKNOWN: &str = "Unknown";

/// An origin/destination pair as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    /// Device position; stands in for a current-location origin when
    /// talking to the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPoint>,
}

impl RouteQuery {
    /// Build a query; a missing or blank origin becomes the current-location sentinel.
    pub fn new(origin: Option<String>, destination: impl Into<String>) -> Self {
        let origin = origin
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| CURRENT_LOCATION.to_string());

        Self {
            origin,
            destination: destination.into(),
            current_location: None,
        }
    }

    pub fn with_current_location(mut self, point: Option<GeoPoint>) -> Self {
        self.current_location = point;
        self
    }

    /// Origin as sent to the provider: coordinates replace the sentinel when
    /// the device position is known, otherwise the origin is passed through.
    pub fn provider_origin(&self) -> String {
        match self.current_location {
            Some(point) if is_current_location(&self.origin) => point.to_query(),
            _ => self.origin.clone(),
        }
    }
}

/// A nearby point of interest attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    /// Provider category tags, in provider order
    pub categories: Vec<String>,
    pub location: GeoPoint,
}

/// One step after markup stripping and landmark augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedStep {
    /// 1-based, contiguous within a route
    pub step_number: usize,
    pub instruction: String,
    pub distance: String,
    pub duration: String,
    pub travel_mode: String,
    /// Zero or one landmark
    pub landmarks: Vec<Landmark>,
}

/// The terminal artifact handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub duration: String,
    pub steps: Vec<EnrichedStep>,
    pub narrative: String,
    pub includes_landmarks: bool,
    pub landmark_count: usize,
    pub is_fallback: bool,
}

/// Error body for failures that have no fallback shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResult {
    pub error: String,
}

/// Per-request switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub include_landmarks: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            include_landmarks: true,
        }
    }
}

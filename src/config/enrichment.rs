//! Step enrichment configuration

use serde::{Deserialize, Serialize};

/// Place categories considered for landmark lookup by default.
pub const DEFAULT_LANDMARK_CATEGORIES: &[&str] = &[
    "point_of_interest",
    "store",
    "restaurant",
    "cafe",
    "park",
    "library",
    "museum",
];

/// Landmark lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Whether steps are augmented with nearby landmarks by default
    pub landmarks_enabled: bool,
    /// Search radius around each step midpoint, in meters
    pub search_radius_m: u32,
    /// Category allow-list passed to the places provider
    pub categories: Vec<String>,
    /// Upper bound on in-flight landmark lookups per route
    pub max_concurrent_lookups: usize,
    /// Deadline for a single landmark lookup
    pub lookup_timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            landmarks_enabled: true,
            search_radius_m: 50,
            categories: DEFAULT_LANDMARK_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_concurrent_lookups: 4,
            lookup_timeout_ms: 3_000,
        }
    }
}

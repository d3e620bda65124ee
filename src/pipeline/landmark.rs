//! Landmark resolution around a step midpoint.

use super::types::Landmark;
use crate::config::EnrichmentConfig;
use crate::provider::{GeoPoint, PlacesProvider, STATUS_OK};
use std::sync::Arc;
use std::time::Duration;

/// Looks up the single most relevant point of interest near a coordinate.
///
/// Every failure mode (provider error, timeout, non-OK status, no results)
/// resolves to `None`. None of them is an error for the caller.
pub struct LandmarkResolver {
    places: Arc<dyn PlacesProvider>,
    radius_m: u32,
    categories: Vec<String>,
    timeout: Duration,
}

impl LandmarkResolver {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        radius_m: u32,
        categories: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            places,
            radius_m,
            categories,
            timeout,
        }
    }

    pub fn from_config(places: Arc<dyn PlacesProvider>, config: &EnrichmentConfig) -> Self {
        Self::new(
            places,
            config.search_radius_m,
            config.categories.clone(),
            Duration::from_millis(config.lookup_timeout_ms),
        )
    }

    /// First named candidate in provider order, or `None`.
    pub async fn resolve(&self, point: GeoPoint) -> Option<Landmark> {
        let lookup = self
            .places
            .search_nearby(point, self.radius_m, &self.categories);

        let response = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::debug!(lat = point.lat, lng = point.lng, error = %e, "Landmark lookup failed");
                record_lookup("error");
                return None;
            }
            Err(_) => {
                tracing::debug!(lat = point.lat, lng = point.lng, "Landmark lookup timed out");
                record_lookup("timeout");
                return None;
            }
        };

        if response.status != STATUS_OK {
            tracing::debug!(status = %response.status, "No landmark candidates");
            record_lookup("none");
            return None;
        }

        let landmark = response
            .results
            .into_iter()
            .find(|candidate| !candidate.name.trim().is_empty())
            .map(|candidate| Landmark {
                name: candidate.name,
                categories: candidate.types,
                location: candidate
                    .geometry
                    .map(|g| g.location)
                    .unwrap_or(point),
            });

        record_lookup(if landmark.is_some() { "found" } else { "none" });
        landmark
    }
}

fn record_lookup(outcome: &'static str) {
    metrics::counter!("wayfinder_landmark_lookups_total", "outcome" => outcome).increment(1);
}

//! Route fetching and response classification.

use super::error::RouteFailure;
use crate::provider::{MappingProvider, RouteLeg, TravelMode};
use std::sync::Arc;
use std::time::Duration;

/// Message used when the provider gives no reason for a missing route.
pub const NO_DIRECTIONS_MESSAGE: &str = "No directions found";

/// Issues one directions request per call and classifies the answer.
///
/// No retries happen here; a retry policy, if any, belongs to the HTTP client.
pub struct RouteFetcher {
    provider: Arc<dyn MappingProvider>,
    mode: TravelMode,
    timeout: Duration,
}

/// Map a non-`OK` provider status onto a failure class.
///
/// Only statuses that rephrasing the query can fix become `NoRoute`; a
/// rejected key is a configuration fault and everything else is transport.
fn classify_status(status: &str, error_message: Option<String>) -> RouteFailure {
    let message = error_message.filter(|m| !m.trim().is_empty());
    let detail = |fallback: &str| message.unwrap_or_else(|| fallback.to_string());

    match status {
        "NOT_FOUND" | "ZERO_RESULTS" | "MAX_ROUTE_LENGTH_EXCEEDED" | "MAX_WAYPOINTS_EXCEEDED" => {
            RouteFailure::NoRoute {
                message: detail(NO_DIRECTIONS_MESSAGE),
            }
        }
        "REQUEST_DENIED" => RouteFailure::Configuration(format!(
            "{}: {}",
            status,
            detail("request denied by provider")
        )),
        _ => RouteFailure::Transport(format!(
            "{}: {}",
            status,
            detail("provider could not answer")
        )),
    }
}

impl RouteFetcher {
    pub fn new(provider: Arc<dyn MappingProvider>, mode: TravelMode, timeout: Duration) -> Self {
        Self {
            provider,
            mode,
            timeout,
        }
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Fetch the first leg of the first route between two locations.
    pub async fn fetch(&self, origin: &str, destination: &str) -> Result<RouteLeg, RouteFailure> {
        if destination.trim().is_empty() {
            return Err(RouteFailure::EmptyDestination);
        }

        let request = self.provider.get_route(origin, destination, self.mode);
        let response = match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RouteFailure::Transport(format!(
                    "Request timeout after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };

        if !response.is_ok() {
            tracing::debug!(
                provider = self.provider.name(),
                status = %response.status,
                "Provider returned no route"
            );
            return Err(classify_status(&response.status, response.error_message));
        }

        response.into_first_leg().ok_or_else(|| RouteFailure::NoRoute {
            message: NO_DIRECTIONS_MESSAGE.to_string(),
        })
    }
}

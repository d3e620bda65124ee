//! Route enrichment and narrative synthesis pipeline.
//!
//! ```text
//! RouteQuery ─► normalize ─► RouteFetcher ─┬─ Ok(leg) ─► StepEnricher (per step,
//!                                          │             concurrent, order-kept)
//!                                          │             ─► synthesize ─► RouteResult
//!                                          ├─ NoRoute ─► build_fallback ─► RouteResult
//!                                          └─ other ───► PipelineError
//! ```
//!
//! Every invocation is request-scoped; the pipeline holds no per-request state.

pub mod augment;
pub mod enrich;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod landmark;
pub mod narrative;
pub mod normalize;
pub mod types;

pub use augment::{InstructionAugmenter, PhrasePatternAugmenter};
pub use enrich::{compose_instruction, strip_markup, StepEnricher};
pub use error::{PipelineError, RouteFailure};
pub use fallback::build_fallback;
pub use fetcher::RouteFetcher;
pub use landmark::LandmarkResolver;
pub use narrative::synthesize;
pub use normalize::{is_current_location, normalize, CURRENT_LOCATION};
pub use types::{
    EnrichedStep, FailureResult, Landmark, PipelineOptions, RouteQuery, RouteResult, UNKNOWN,
};

use crate::config::{EnrichmentConfig, MapsConfig};
use crate::provider::{MappingProvider, PlacesProvider, RawStep, RouteLeg, TravelMode};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Orchestrates normalization, fetching, enrichment and synthesis.
pub struct RoutePipeline {
    fetcher: RouteFetcher,
    enricher: StepEnricher,
    max_concurrent_lookups: usize,
}

impl RoutePipeline {
    pub fn new(fetcher: RouteFetcher, enricher: StepEnricher, max_concurrent_lookups: usize) -> Self {
        Self {
            fetcher,
            enricher,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        }
    }

    /// Wire a pipeline from configuration.
    ///
    /// Landmark lookup is compiled in only when `enrichment.landmarks_enabled`;
    /// per-request options can switch it off but never on.
    pub fn from_config(
        mapping: Arc<dyn MappingProvider>,
        places: Arc<dyn PlacesProvider>,
        maps: &MapsConfig,
        enrichment: &EnrichmentConfig,
    ) -> Self {
        let mode = maps.travel_mode.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to driving directions");
            TravelMode::Driving
        });
        let fetcher = RouteFetcher::new(
            mapping,
            mode,
            Duration::from_millis(maps.request_timeout_ms),
        );

        let resolver = enrichment
            .landmarks_enabled
            .then(|| LandmarkResolver::from_config(places, enrichment));

        Self::new(
            fetcher,
            StepEnricher::new(resolver),
            enrichment.max_concurrent_lookups,
        )
    }

    /// Replace the instruction augmenter.
    pub fn with_augmenter(mut self, augmenter: Arc<dyn InstructionAugmenter>) -> Self {
        self.enricher = self.enricher.with_augmenter(augmenter);
        self
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.fetcher.mode()
    }

    pub fn landmarks_available(&self) -> bool {
        self.enricher.has_resolver()
    }

    /// Run the full pipeline for one query.
    ///
    /// Returns a real or fallback [`RouteResult`], or a [`PipelineError`] for
    /// failures that rephrasing the query cannot fix.
    pub async fn run(
        &self,
        query: &RouteQuery,
        options: PipelineOptions,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, PipelineError> {
        let (origin, destination) = normalize(&query.provider_origin(), &query.destination);
        if destination != query.destination {
            tracing::debug!(from = %query.destination, to = %destination, "Rewrote destination");
        }

        let leg = match self.fetcher.fetch(&origin, &destination).await {
            Ok(leg) => leg,
            Err(RouteFailure::NoRoute { message }) => {
                tracing::warn!(destination = %query.destination, reason = %message, "No route found, using fallback");
                record_route("fallback");
                return Ok(build_fallback(&query.origin, &query.destination));
            }
            Err(RouteFailure::EmptyDestination) => {
                record_route("invalid");
                return Err(PipelineError::InvalidQuery(
                    RouteFailure::EmptyDestination.to_string(),
                ));
            }
            Err(RouteFailure::Configuration(message)) => {
                tracing::error!(error = %message, "Directions provider misconfigured");
                record_route("configuration_error");
                return Err(PipelineError::Configuration(message));
            }
            Err(RouteFailure::Transport(message)) => {
                tracing::warn!(error = %message, "Directions request failed");
                record_route("transport_error");
                return Err(PipelineError::Transport(message));
            }
        };

        let include_landmarks = options.include_landmarks && self.enricher.has_resolver();
        let steps = self
            .enrich_steps(&leg.steps, include_landmarks, cancel)
            .await;

        record_route("ok");
        Ok(assemble(leg, steps, &query.origin, &destination))
    }

    /// Enrich steps concurrently, keeping provider order regardless of which
    /// lookup finishes first.
    pub async fn enrich_steps(
        &self,
        steps: &[RawStep],
        include_landmarks: bool,
        cancel: &CancellationToken,
    ) -> Vec<EnrichedStep> {
        // Futures are built up front so the stream never holds a closure
        // borrowing `self`, which keeps the handler future `Send`.
        let lookups: Vec<_> = steps
            .iter()
            .enumerate()
            .map(|(index, step)| self.enrich_one(index + 1, step, include_landmarks, cancel))
            .collect();

        stream::iter(lookups)
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await
    }

    async fn enrich_one(
        &self,
        step_number: usize,
        step: &RawStep,
        include_landmarks: bool,
        cancel: &CancellationToken,
    ) -> EnrichedStep {
        let (instruction, landmarks) = self.enricher.enrich(step, include_landmarks, cancel).await;
        EnrichedStep {
            step_number,
            instruction,
            distance: step.distance_text.clone().unwrap_or_default(),
            duration: step.duration_text.clone().unwrap_or_default(),
            travel_mode: step.mode.tag().to_string(),
            landmarks,
        }
    }
}

fn or_unknown(value: String) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}

/// Build the final result from a fetched leg and its enriched steps.
fn assemble(
    leg: RouteLeg,
    steps: Vec<EnrichedStep>,
    requested_origin: &str,
    requested_destination: &str,
) -> RouteResult {
    let origin = if leg.start_address.trim().is_empty() {
        requested_origin.to_string()
    } else {
        leg.start_address
    };
    let destination = if leg.end_address.trim().is_empty() {
        requested_destination.to_string()
    } else {
        leg.end_address
    };
    let distance = or_unknown(leg.distance_text);
    let duration = or_unknown(leg.duration_text);

    let narrative = synthesize(&origin, &destination, &distance, &duration, &steps);
    let landmark_count = steps.iter().map(|s| s.landmarks.len()).sum();

    RouteResult {
        origin,
        destination,
        distance,
        duration,
        steps,
        narrative,
        includes_landmarks: landmark_count > 0,
        landmark_count,
        is_fallback: false,
    }
}

fn record_route(outcome: &'static str) {
    metrics::counter!("wayfinder_routes_total", "outcome" => outcome).increment(1);
}

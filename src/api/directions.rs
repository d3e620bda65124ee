//! `POST /api/get-directions`

use super::{record_request, ApiError, AppState, DirectionsRequest};
use crate::metrics::PIPELINE_DURATION;
use crate::pipeline::{FailureResult, PipelineOptions, RouteQuery, RouteResult};
use crate::store::{DirectionsRecord, FailureRecord, RequestSummary, StoredRecord};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Instant;

const ENDPOINT: &str = "get_directions";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fill origin/destination from the request, consulting the extractor only
/// when no destination was given explicitly.
async fn resolve_locations(
    state: &AppState,
    request: &DirectionsRequest,
) -> Result<(Option<String>, Option<String>), ApiError> {
    let origin = non_blank(request.origin.clone());
    let destination = non_blank(request.destination.clone());
    if destination.is_some() {
        return Ok((origin, destination));
    }

    let Some(text) = non_blank(request.text.clone()) else {
        return Ok((origin, None));
    };
    let extractor = state
        .services
        .extractor
        .as_ref()
        .ok_or_else(|| ApiError::configuration("Location extraction is not configured"))?;

    let extracted = extractor.extract(&text).await?;
    tracing::debug!(
        origin = ?extracted.origin,
        destination = ?extracted.destination,
        "Extracted locations from text"
    );

    Ok((origin.or(extracted.origin), extracted.destination))
}

pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DirectionsRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    let outcome = directions(&state, request).await;
    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    record_request(ENDPOINT, status);
    outcome
}

async fn directions(
    state: &Arc<AppState>,
    request: DirectionsRequest,
) -> Result<Json<RouteResult>, ApiError> {
    let (origin, destination) = resolve_locations(state, &request).await?;
    let destination = destination
        .ok_or_else(|| ApiError::bad_request("Could not determine a destination from the request"))?;

    let query = RouteQuery::new(origin, destination).with_current_location(request.current_location);

    let options = PipelineOptions {
        include_landmarks: request.include_landmarks.unwrap_or(true),
    };

    // Dropping this handler (client gone) or shutting down abandons pending lookups
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let started = Instant::now();
    let result = state.services.pipeline.run(&query, options, &cancel).await;
    metrics::histogram!(PIPELINE_DURATION).record(started.elapsed().as_secs_f64());

    let summary = RequestSummary::from(&request);
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            let failure = FailureResult::from(&e);
            persist(state, StoredRecord::Failure(FailureRecord::new(summary, failure)));
            return Err(ApiError::from(&e));
        }
    };
    tracing::info!(
        destination = %result.destination,
        steps = result.steps.len(),
        landmarks = result.landmark_count,
        is_fallback = result.is_fallback,
        "Directions served"
    );

    persist(
        state,
        StoredRecord::Directions(DirectionsRecord::new(summary, &result)),
    );

    Ok(Json(result))
}

/// Write a directions outcome in the background; failures are only logged.
fn persist(state: &AppState, record: StoredRecord) {
    let Some(store) = state.services.store.clone() else {
        return;
    };
    tokio::spawn(async move {
        let saved = match record {
            StoredRecord::Directions(r) => store.save_directions(r).await,
            StoredRecord::Failure(r) => store.save_failure(r).await,
            StoredRecord::Transcript(r) => store.save_transcript(r).await,
        };
        if let Err(e) = saved {
            tracing::warn!(error = %e, "Failed to record directions outcome");
        }
    });
}

//! `POST /api/save-transcript`

use super::{record_request, ApiError, AppState, SavedResponse, TranscriptRequest};
use crate::store::TranscriptRecord;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

const ENDPOINT: &str = "save_transcript";

pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscriptRequest>,
) -> Result<(StatusCode, Json<SavedResponse>), ApiError> {
    let outcome = save(&state, request).await;
    let status = match &outcome {
        Ok((status, _)) => *status,
        Err(e) => e.status_code(),
    };
    record_request(ENDPOINT, status);
    outcome
}

async fn save(
    state: &AppState,
    request: TranscriptRequest,
) -> Result<(StatusCode, Json<SavedResponse>), ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("Transcript text is required"));
    }

    let store = state
        .services
        .store
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Transcript storage is disabled"))?;

    let record = TranscriptRecord::new(request.text, request.user_id, request.timestamp);
    let id = store.save_transcript(record).await?;
    tracing::debug!(%id, "Transcript saved");

    Ok((StatusCode::CREATED, Json(SavedResponse { id })))
}

//! `GET /health`

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when directions can be served, `degraded` without a maps key
    pub status: String,
    pub uptime_seconds: u64,
    pub maps_configured: bool,
    pub extraction_configured: bool,
    pub stored_records: usize,
}

pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let services = &state.services;
    let stored_records = match &services.store {
        Some(store) => store.count().await,
        None => 0,
    };

    let status = if services.maps_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        maps_configured: services.maps_configured,
        extraction_configured: services.extraction_configured,
        stored_records,
    })
}

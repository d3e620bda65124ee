//! Request and response types for the HTTP API.

use crate::extract::ExtractError;
use crate::pipeline::PipelineError;
use crate::provider::GeoPoint;
use crate::store::{RequestSummary, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/get-directions`.
///
/// Either `destination` or `text` must be present. Explicit fields win over
/// anything extracted from `text`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionsRequest {
    pub text: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Device position, substituted for a "current location" origin
    pub current_location: Option<GeoPoint>,
    pub include_landmarks: Option<bool>,
}

impl From<&DirectionsRequest> for RequestSummary {
    fn from(request: &DirectionsRequest) -> Self {
        Self {
            text: request.text.clone(),
            origin: request.origin.clone(),
            destination: request.destination.clone(),
        }
    }
}

/// Body of `POST /api/save-transcript`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscriptRequest {
    pub text: String,
    pub timestamp: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SavedResponse {
    pub id: Uuid,
}

/// Error returned from any endpoint: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip, default = "default_status")]
    status: StatusCode,
    pub error: String,
}

fn default_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    /// 400
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500, for missing credentials and similar deployment problems.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 502
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// 503
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }
}

impl From<&PipelineError> for ApiError {
    fn from(err: &PipelineError) -> Self {
        match err {
            PipelineError::InvalidQuery(_) => Self::bad_request(err.to_string()),
            PipelineError::Configuration(_) => Self::configuration(err.to_string()),
            PipelineError::Transport(_) => Self::bad_gateway(err.to_string()),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        if err.is_configuration() {
            Self::configuration(format!("Location extraction unavailable: {}", err))
        } else {
            Self::bad_gateway(format!("Location extraction failed: {}", err))
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidRecord(_) => Self::bad_request(err.to_string()),
            StoreError::Unavailable(_) => Self::service_unavailable(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

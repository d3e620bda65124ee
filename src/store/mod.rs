//! Audit store for transcripts and served directions.
//!
//! Writes are fire-and-forget from the API's point of view: a failing store
//! is logged and never changes a response.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::pipeline::{FailureResult, RouteResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transcript submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub id: Uuid,
    pub text: String,
    pub user_id: Option<String>,
    /// Client-reported timestamp, stored verbatim
    pub client_timestamp: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TranscriptRecord {
    pub fn new(text: impl Into<String>, user_id: Option<String>, client_timestamp: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            user_id,
            client_timestamp,
            created_at: Utc::now(),
        }
    }
}

/// What the client asked for, kept alongside every directions outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub text: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Summary of one directions response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRecord {
    pub id: Uuid,
    pub request: RequestSummary,
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub duration: String,
    pub step_count: usize,
    pub landmark_count: usize,
    pub is_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl DirectionsRecord {
    pub fn new(request: RequestSummary, result: &RouteResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            origin: result.origin.clone(),
            destination: result.destination.clone(),
            distance: result.distance.clone(),
            duration: result.duration.clone(),
            step_count: result.steps.len(),
            landmark_count: result.landmark_count,
            is_fallback: result.is_fallback,
            created_at: Utc::now(),
        }
    }
}

/// A directions request the pipeline could not answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub id: Uuid,
    pub request: RequestSummary,
    pub error: String,
    pub created_at: DateTime<Utc>,
}

impl FailureRecord {
    pub fn new(request: RequestSummary, failure: FailureResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            error: failure.error,
            created_at: Utc::now(),
        }
    }
}

/// Any kind of stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredRecord {
    Transcript(TranscriptRecord),
    Directions(DirectionsRecord),
    Failure(FailureRecord),
}

impl StoredRecord {
    pub fn id(&self) -> Uuid {
        match self {
            StoredRecord::Transcript(r) => r.id,
            StoredRecord::Directions(r) => r.id,
            StoredRecord::Failure(r) => r.id,
        }
    }
}

#[async_trait]
pub trait DirectionsStore: Send + Sync + 'static {
    /// Persist a transcript, returning its id.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidRecord` when the text is blank.
    async fn save_transcript(&self, record: TranscriptRecord) -> Result<Uuid, StoreError>;

    async fn save_directions(&self, record: DirectionsRecord) -> Result<Uuid, StoreError>;

    async fn save_failure(&self, record: FailureRecord) -> Result<Uuid, StoreError>;

    async fn get(&self, id: Uuid) -> Option<StoredRecord>;

    /// Number of records currently held.
    async fn count(&self) -> usize;
}

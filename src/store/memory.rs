//! In-memory store bounded by record count.

use super::{
    DirectionsRecord, DirectionsStore, FailureRecord, StoreError, StoredRecord, TranscriptRecord,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Concurrent map of records plus an insertion queue for eviction.
///
/// Once `max_records` is reached, each insert evicts the oldest record.
pub struct MemoryStore {
    records: DashMap<Uuid, StoredRecord>,
    order: Mutex<VecDeque<Uuid>>,
    max_records: usize,
}

impl MemoryStore {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_records: max_records.max(1),
        }
    }

    fn insert(&self, record: StoredRecord) -> Result<Uuid, StoreError> {
        let id = record.id();
        let mut order = self
            .order
            .lock()
            .map_err(|_| StoreError::Unavailable("record index poisoned".to_string()))?;

        while order.len() >= self.max_records {
            match order.pop_front() {
                Some(oldest) => {
                    self.records.remove(&oldest);
                    tracing::trace!(id = %oldest, "Evicted record");
                }
                None => break,
            }
        }

        self.records.insert(id, record);
        order.push_back(id);
        Ok(id)
    }
}

#[async_trait]
impl DirectionsStore for MemoryStore {
    async fn save_transcript(&self, record: TranscriptRecord) -> Result<Uuid, StoreError> {
        if record.text.trim().is_empty() {
            return Err(StoreError::InvalidRecord("transcript text is empty".to_string()));
        }
        self.insert(StoredRecord::Transcript(record))
    }

    async fn save_directions(&self, record: DirectionsRecord) -> Result<Uuid, StoreError> {
        self.insert(StoredRecord::Directions(record))
    }

    async fn save_failure(&self, record: FailureRecord) -> Result<Uuid, StoreError> {
        self.insert(StoredRecord::Failure(record))
    }

    async fn get(&self, id: Uuid) -> Option<StoredRecord> {
        self.records.get(&id).map(|r| r.value().clone())
    }

    async fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{build_fallback, FailureResult};
    use crate::store::RequestSummary;

    #[tokio::test]
    async fn test_save_and_get_transcript() {
        let store = MemoryStore::new(10);
        let record = TranscriptRecord::new("to the library", Some("u1".to_string()), None);
        let id = store.save_transcript(record.clone()).await.unwrap();

        assert_eq!(id, record.id);
        assert_eq!(store.count().await, 1);
        assert_eq!(store.get(id).await, Some(StoredRecord::Transcript(record)));
    }

    #[tokio::test]
    async fn test_blank_transcript_rejected() {
        let store = MemoryStore::new(10);
        let err = store
            .save_transcript(TranscriptRecord::new("   ", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_directions_record_from_result() {
        let store = MemoryStore::new(10);
        let result = build_fallback("current location", "Atlantis");
        let request = RequestSummary {
            text: Some("take me to Atlantis".to_string()),
            ..RequestSummary::default()
        };
        let id = store
            .save_directions(DirectionsRecord::new(request, &result))
            .await
            .unwrap();

        match store.get(id).await {
            Some(StoredRecord::Directions(record)) => {
                assert!(record.is_fallback);
                assert_eq!(record.destination, "Atlantis");
                assert_eq!(record.step_count, 1);
                assert_eq!(record.request.text.as_deref(), Some("take me to Atlantis"));
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_record_keeps_request_and_error() {
        let store = MemoryStore::new(10);
        let request = RequestSummary {
            text: None,
            origin: Some("Home".to_string()),
            destination: Some("Work".to_string()),
        };
        let failure = FailureResult {
            error: "Directions provider error: timed out".to_string(),
        };
        let id = store
            .save_failure(FailureRecord::new(request.clone(), failure))
            .await
            .unwrap();

        match store.get(id).await {
            Some(StoredRecord::Failure(record)) => {
                assert_eq!(record.request, request);
                assert_eq!(record.error, "Directions provider error: timed out");
            }
            other => panic!("unexpected record: {:?}", other),
        }

        let json = serde_json::to_value(store.get(id).await.unwrap()).unwrap();
        assert_eq!(json["kind"], "failure");
        assert_eq!(json["request"]["destination"], "Work");
    }

    #[tokio::test]
    async fn test_evicts_oldest_first() {
        let store = MemoryStore::new(2);
        let first = store
            .save_transcript(TranscriptRecord::new("one", None, None))
            .await
            .unwrap();
        let second = store
            .save_transcript(TranscriptRecord::new("two", None, None))
            .await
            .unwrap();
        let third = store
            .save_transcript(TranscriptRecord::new("three", None, None))
            .await
            .unwrap();

        assert_eq!(store.count().await, 2);
        assert!(store.get(first).await.is_none());
        assert!(store.get(second).await.is_some());
        assert!(store.get(third).await.is_some());
    }

    #[test]
    fn test_stored_record_serializes_kind() {
        let record = StoredRecord::Transcript(TranscriptRecord::new("hi", None, None));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "transcript");
        assert_eq!(json["text"], "hi");
    }
}

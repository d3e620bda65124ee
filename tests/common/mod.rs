//! Shared test utilities for Wayfinder integration tests.
//!
//! Google endpoints are served by a `wiremock` server: directions under
//! `/directions/json`, nearby search under `/places/json`.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use wayfinder::api::{create_router, AppState, Services};
use wayfinder::config::{EnrichmentConfig, MapsConfig, WayfinderConfig};
use wayfinder::extract::LocationExtractor;
use wayfinder::pipeline::RoutePipeline;
use wayfinder::provider::GoogleMapsClient;
use wayfinder::store::{
    DirectionsRecord, DirectionsStore, FailureRecord, MemoryStore, StoreError, StoredRecord,
    TranscriptRecord,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DIRECTIONS_PATH: &str = "/directions/json";
pub const PLACES_PATH: &str = "/places/json";
pub const TEST_KEY: &str = "test-key";

/// Maps config pointed at the mock server.
pub fn maps_config(server: &MockServer) -> MapsConfig {
    MapsConfig {
        directions_url: format!("{}{}", server.uri(), DIRECTIONS_PATH),
        places_url: format!("{}{}", server.uri(), PLACES_PATH),
        request_timeout_ms: 2_000,
        ..MapsConfig::default()
    }
}

pub fn google_client(server: &MockServer) -> Arc<GoogleMapsClient> {
    Arc::new(GoogleMapsClient::new(
        &maps_config(server),
        Some(TEST_KEY.to_string()),
        Arc::new(reqwest::Client::new()),
    ))
}

pub fn pipeline(server: &MockServer, enrichment: &EnrichmentConfig) -> RoutePipeline {
    let client = google_client(server);
    RoutePipeline::from_config(client.clone(), client, &maps_config(server), enrichment)
}

/// A driving step from `(lat, 0)` to `(lat + 0.002, 0)`.
pub fn step(html: &str, lat: f64) -> Value {
    json!({
        "html_instructions": html,
        "travel_mode": "DRIVING",
        "distance": { "text": "0.2 km", "value": 200 },
        "duration": { "text": "1 min", "value": 60 },
        "start_location": { "lat": lat, "lng": 0.0 },
        "end_location": { "lat": lat + 0.002, "lng": 0.0 }
    })
}

pub fn directions_body(steps: Vec<Value>) -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "summary": "Main St",
            "legs": [{
                "start_address": "100 Start St, Springfield",
                "end_address": "200 End Ave, Springfield",
                "distance": { "text": "1.2 km", "value": 1200 },
                "duration": { "text": "5 mins", "value": 300 },
                "steps": steps
            }]
        }]
    })
}

pub fn place_body(name: &str, types: &[&str]) -> Value {
    json!({
        "status": "OK",
        "results": [{
            "name": name,
            "types": types,
            "geometry": { "location": { "lat": 1.0, "lng": 1.0 } }
        }]
    })
}

pub async fn mount_directions(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_places(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(PLACES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Services backed by the mock server, an optional extractor and an
/// in-memory store.
pub fn services(
    server: &MockServer,
    extractor: Option<Arc<dyn LocationExtractor>>,
) -> Services {
    Services {
        pipeline: Arc::new(pipeline(server, &EnrichmentConfig::default())),
        extraction_configured: extractor.is_some(),
        extractor,
        store: Some(Arc::new(MemoryStore::new(100)) as Arc<dyn DirectionsStore>),
        maps_configured: true,
    }
}

pub fn app(services: Services) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_services(
        Arc::new(WayfinderConfig::default()),
        services,
    ));
    (create_router(Arc::clone(&state)), state)
}

/// Store that keeps every record in arrival order so tests can inspect them.
#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl RecordingStore {
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Wait for background writes to land, up to half a second.
    pub async fn wait_for(&self, count: usize) -> Vec<StoredRecord> {
        for _ in 0..50 {
            let records = self.records();
            if records.len() >= count {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.records()
    }

    fn push(&self, record: StoredRecord) -> Result<Uuid, StoreError> {
        let id = record.id();
        self.records.lock().unwrap().push(record);
        Ok(id)
    }
}

#[async_trait]
impl DirectionsStore for RecordingStore {
    async fn save_transcript(&self, record: TranscriptRecord) -> Result<Uuid, StoreError> {
        self.push(StoredRecord::Transcript(record))
    }

    async fn save_directions(&self, record: DirectionsRecord) -> Result<Uuid, StoreError> {
        self.push(StoredRecord::Directions(record))
    }

    async fn save_failure(&self, record: FailureRecord) -> Result<Uuid, StoreError> {
        self.push(StoredRecord::Failure(record))
    }

    async fn get(&self, id: Uuid) -> Option<StoredRecord> {
        self.records().into_iter().find(|r| r.id() == id)
    }

    async fn count(&self) -> usize {
        self.records().len()
    }
}

/// Like [`services`], but writes go to the returned [`RecordingStore`].
pub fn recorded_services(server: &MockServer) -> (Services, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    let services = Services {
        store: Some(store.clone() as Arc<dyn DirectionsStore>),
        ..services(server, None)
    };
    (services, store)
}

//! HTTP API.
//!
//! | Method | Path                  | Handler                         |
//! |--------|-----------------------|---------------------------------|
//! | POST   | `/api/get-directions` | [`directions::handle`]          |
//! | POST   | `/api/save-transcript`| [`transcript::handle`]          |
//! | GET    | `/health`             | [`health::handle`]              |
//! | GET    | `/metrics`            | Prometheus text                 |

pub mod directions;
pub mod health;
pub mod transcript;
pub mod types;

pub use types::*;

use crate::config::WayfinderConfig;
use crate::extract::{GeminiExtractor, LocationExtractor};
use crate::metrics::MetricsCollector;
use crate::pipeline::RoutePipeline;
use crate::provider::GoogleMapsClient;
use crate::store::{DirectionsStore, MemoryStore};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Transcripts and directions requests are small JSON bodies.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// The collaborators a request handler needs.
pub struct Services {
    pub pipeline: Arc<RoutePipeline>,
    pub extractor: Option<Arc<dyn LocationExtractor>>,
    pub store: Option<Arc<dyn DirectionsStore>>,
    pub maps_configured: bool,
    pub extraction_configured: bool,
}

impl Services {
    /// Build the Google-backed services described by `config`.
    pub fn from_config(config: &WayfinderConfig) -> Self {
        let http_client = Arc::new(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(config.server.request_timeout_seconds))
                .pool_max_idle_per_host(10)
                .build()
                .expect("Failed to create HTTP client"),
        );

        let maps = Arc::new(GoogleMapsClient::from_config(
            &config.maps,
            Arc::clone(&http_client),
        ));
        let extractor = GeminiExtractor::from_config(&config.extraction, http_client);
        let pipeline = RoutePipeline::from_config(
            maps.clone(),
            maps.clone(),
            &config.maps,
            &config.enrichment,
        );

        let store: Option<Arc<dyn DirectionsStore>> = config
            .store
            .enabled
            .then(|| Arc::new(MemoryStore::new(config.store.max_records)) as Arc<dyn DirectionsStore>);

        Self {
            pipeline: Arc::new(pipeline),
            maps_configured: maps.has_credential(),
            extraction_configured: extractor.has_credential(),
            extractor: Some(Arc::new(extractor)),
            store,
        }
    }
}

/// Shared state for all handlers.
pub struct AppState {
    pub config: Arc<WayfinderConfig>,
    pub services: Services,
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
    /// Cancelled on shutdown; each request derives a child token from it
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Arc<WayfinderConfig>) -> Self {
        let services = Services::from_config(&config);
        Self::with_services(config, services)
    }

    pub fn with_services(config: Arc<WayfinderConfig>, services: Services) -> Self {
        let start_time = Instant::now();
        let metrics_collector = Arc::new(MetricsCollector::new(
            start_time,
            crate::metrics::handle_or_detached(),
        ));

        Self {
            config,
            services,
            start_time,
            metrics_collector,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the axum router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/get-directions", post(directions::handle))
        .route("/api/save-transcript", post(transcript::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(build_cors_layer(&state.config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}

pub(crate) fn record_request(endpoint: &'static str, status: axum::http::StatusCode) {
    metrics::counter!(
        "wayfinder_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

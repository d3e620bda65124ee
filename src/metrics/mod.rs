//! # Metrics
//!
//! Prometheus export for the directions service, served at `GET /metrics`.
//!
//! **Counters:**
//! - `wayfinder_routes_total{outcome}` - Pipeline runs by outcome
//!   (`ok`, `fallback`, `invalid`, `configuration_error`, `transport_error`)
//! - `wayfinder_landmark_lookups_total{outcome}` - Landmark lookups
//!   (`found`, `none`, `error`, `timeout`)
//! - `wayfinder_http_requests_total{endpoint, status}` - API requests
//!
//! **Histograms:**
//! - `wayfinder_pipeline_duration_seconds` - End-to-end pipeline latency

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use std::time::Instant;

/// Name of the pipeline latency histogram.
pub const PIPELINE_DURATION: &str = "wayfinder_pipeline_duration_seconds";

/// Holds the Prometheus handle and process start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Seconds since the service started.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render metrics in Prometheus text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder.
///
/// Pipeline buckets span a landmark-free cache hit up to a slow provider
/// with every lookup timing out.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(PIPELINE_DURATION.to_string()), duration_buckets)?
        .install_recorder()?;

    Ok(handle)
}

/// Global handle if none is installed yet, otherwise a detached one.
pub fn handle_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_uptime_starts_at_zero() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_detached_handle_renders() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        // Nothing recorded through a detached recorder
        assert!(collector.render_metrics().is_empty());
    }
}

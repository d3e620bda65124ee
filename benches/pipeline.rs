//! Benchmarks for step enrichment and narrative synthesis.
//!
//! Provider calls are replaced by in-memory fakes so only the pipeline's own
//! work is measured.

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wayfinder::pipeline::{
    compose_instruction, strip_markup, synthesize, EnrichedStep, Landmark, LandmarkResolver,
    PhrasePatternAugmenter, RouteFetcher, RoutePipeline, StepEnricher,
};
use wayfinder::provider::types::PlaceGeometry;
use wayfinder::provider::{
    DirectionsResponse, GeoPoint, MappingProvider, PlaceCandidate, PlacesProvider, PlacesResponse,
    ProviderError, RawStep, StepMode, TransitDetails, TravelMode,
};

const INSTRUCTION: &str = "Turn <b>left</b> onto <b>Pine St</b><div style=\"font-size:0.9em\">\
                           Pass by Joe&#39;s &amp; Sons (on the right)</div>";

struct NoRoutes;

#[async_trait]
impl MappingProvider for NoRoutes {
    fn name(&self) -> &str {
        "bench"
    }

    async fn get_route(
        &self,
        _origin: &str,
        _destination: &str,
        _mode: TravelMode,
    ) -> Result<DirectionsResponse, ProviderError> {
        Ok(DirectionsResponse::default())
    }
}

/// Answers every lookup immediately with the same park.
struct InstantPlaces;

#[async_trait]
impl PlacesProvider for InstantPlaces {
    async fn search_nearby(
        &self,
        point: GeoPoint,
        _radius_m: u32,
        _categories: &[String],
    ) -> Result<PlacesResponse, ProviderError> {
        Ok(PlacesResponse {
            status: "OK".to_string(),
            error_message: None,
            results: vec![PlaceCandidate {
                name: "Riverside Park".to_string(),
                types: vec!["park".to_string(), "point_of_interest".to_string()],
                geometry: Some(PlaceGeometry { location: point }),
            }],
        })
    }
}

fn raw_step(i: usize) -> RawStep {
    RawStep {
        instruction_html: INSTRUCTION.to_string(),
        distance_text: Some("0.4 km".to_string()),
        duration_text: Some("2 mins".to_string()),
        start: Some(GeoPoint::new(i as f64 * 0.01, 0.0)),
        end: Some(GeoPoint::new(i as f64 * 0.01 + 0.005, 0.0)),
        maneuver: Some("turn-left".to_string()),
        mode: StepMode::Driving,
    }
}

fn bench_strip_markup(c: &mut Criterion) {
    c.bench_function("strip_markup", |b| {
        b.iter(|| black_box(strip_markup(black_box(INSTRUCTION))));
    });
}

fn bench_compose_instruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_instruction");
    let landmark = Landmark {
        name: "Riverside Park".to_string(),
        categories: vec!["park".to_string()],
        location: GeoPoint::default(),
    };
    let plain = raw_step(0);
    let mut transit = raw_step(0);
    transit.mode = StepMode::Transit(TransitDetails {
        line_name: Some("M15".to_string()),
        vehicle_type: Some("BUS".to_string()),
        departure_stop: Some("1 Av/E 14 St".to_string()),
        arrival_stop: Some("1 Av/E 42 St".to_string()),
    });

    group.bench_function("no_landmark", |b| {
        b.iter(|| black_box(compose_instruction(&plain, None, &PhrasePatternAugmenter)));
    });
    group.bench_function("with_landmark", |b| {
        b.iter(|| {
            black_box(compose_instruction(
                &plain,
                Some(&landmark),
                &PhrasePatternAugmenter,
            ))
        });
    });
    group.bench_function("transit", |b| {
        b.iter(|| black_box(compose_instruction(&transit, None, &PhrasePatternAugmenter)));
    });

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for count in [1, 10, 50] {
        let steps: Vec<EnrichedStep> = (1..=count)
            .map(|n| EnrichedStep {
                step_number: n,
                instruction: "Turn left onto Pine St. Continue for 0.4 km.".to_string(),
                distance: "0.4 km".to_string(),
                duration: "2 mins".to_string(),
                travel_mode: "DRIVING".to_string(),
                landmarks: vec![],
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("steps", count), &steps, |b, steps| {
            b.iter(|| black_box(synthesize("Home", "Work", "12 km", "20 mins", steps)));
        });
    }

    group.finish();
}

fn bench_enrich_steps(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let resolver = LandmarkResolver::new(
        Arc::new(InstantPlaces),
        50,
        vec!["park".to_string()],
        Duration::from_secs(1),
    );
    let pipeline = RoutePipeline::new(
        RouteFetcher::new(Arc::new(NoRoutes), TravelMode::Driving, Duration::from_secs(1)),
        StepEnricher::new(Some(resolver)),
        8,
    );
    let cancel = CancellationToken::new();

    let mut group = c.benchmark_group("enrich_steps");
    for count in [1, 10, 50] {
        let steps: Vec<RawStep> = (0..count).map(raw_step).collect();

        group.bench_with_input(BenchmarkId::new("steps", count), &steps, |b, steps| {
            b.iter(|| black_box(runtime.block_on(pipeline.enrich_steps(steps, true, &cancel))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_strip_markup,
    bench_compose_instruction,
    bench_synthesize,
    bench_enrich_steps,
);
criterion_main!(benches);

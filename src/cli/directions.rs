//! One-shot directions command

use crate::api::Services;
use crate::cli::output::{format_route_json, format_route_pretty};
use crate::cli::serve::load_config;
use crate::cli::DirectionsArgs;
use crate::config::WayfinderConfig;
use crate::pipeline::{PipelineOptions, RouteQuery};
use crate::provider::TravelMode;
use tokio_util::sync::CancellationToken;

/// Apply command-line flags on top of the loaded configuration.
pub fn apply_overrides(
    mut config: WayfinderConfig,
    args: &DirectionsArgs,
) -> Result<WayfinderConfig, Box<dyn std::error::Error>> {
    if let Some(mode) = &args.mode {
        let mode: TravelMode = mode.parse()?;
        config.maps.travel_mode = mode.as_str().to_string();
    }
    if args.no_landmarks {
        config.enrichment.landmarks_enabled = false;
    }
    // A one-shot run has nothing to audit
    config.store.enabled = false;
    Ok(config)
}

/// Handle `wayfinder directions`, returning the rendered output.
///
/// Fallback results are printed like any other; only configuration and
/// transport failures are errors.
pub async fn handle_directions(args: &DirectionsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = apply_overrides(load_config(&args.config)?, args)?;
    config.validate()?;

    let services = Services::from_config(&config);
    let query = RouteQuery::new(args.from.clone(), args.to.clone());
    let options = PipelineOptions {
        include_landmarks: !args.no_landmarks,
    };

    let result = services
        .pipeline
        .run(&query, options, &CancellationToken::new())
        .await?;

    if args.json {
        Ok(format_route_json(&result)?)
    } else {
        Ok(format_route_pretty(&result))
    }
}

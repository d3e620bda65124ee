//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, WayfinderConfig};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load the config file if present, otherwise defaults, then apply env overrides.
pub fn load_config(path: &Path) -> Result<WayfinderConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        WayfinderConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        WayfinderConfig::default()
    };

    Ok(config.with_env_overrides())
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<WayfinderConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;

    // CLI flags have the highest priority
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_landmarks {
        config.enrichment.landmarks_enabled = false;
    }
    if args.no_store {
        config.store.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Resolves with the name of the first termination signal received.
async fn termination_signal() -> &'static str {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}

/// Stop accepting connections and abandon in-flight landmark lookups.
async fn shutdown_signal(shutdown: CancellationToken) {
    let signal = termination_signal().await;
    tracing::info!(signal, "Shutting down, cancelling in-flight lookups");
    shutdown.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting Wayfinder server");
    tracing::debug!(?config, "Loaded configuration");

    let cancel_token = CancellationToken::new();
    let app_state = Arc::new(
        AppState::new(Arc::new(config.clone())).with_shutdown(cancel_token.clone()),
    );
    tracing::info!(
        travel_mode = %app_state.services.pipeline.travel_mode(),
        landmarks = app_state.services.pipeline.landmarks_available(),
        store = app_state.services.store.is_some(),
        "Pipeline ready"
    );
    let app = create_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "Wayfinder API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    tracing::info!("Wayfinder server stopped");
    Ok(())
}

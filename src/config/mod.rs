//! Configuration module for Wayfinder
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`WAYFINDER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! Provider credentials are never stored in the file itself. Each provider
//! section names the environment variable holding its key (`api_key_env`),
//! and the key is read exactly once at start-up via [`MapsConfig::resolve_api_key`].
//!
//! # Example
//!
//! ```rust
//! use wayfinder::config::WayfinderConfig;
//!
//! // Load defaults
//! let config = WayfinderConfig::default();
//! assert_eq!(config.server.port, 5000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [enrichment]
//! search_radius_m = 75
//! "#;
//! let config: WayfinderConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.enrichment.search_radius_m, 75);
//! ```

pub mod enrichment;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod maps;
pub mod server;
pub mod store;

pub use enrichment::EnrichmentConfig;
pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use maps::MapsConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

use crate::provider::TravelMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Wayfinder service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WayfinderConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Mapping and places provider settings
    pub maps: MapsConfig,
    /// Step enrichment (landmark lookup) settings
    pub enrichment: EnrichmentConfig,
    /// Origin/destination extraction service settings
    pub extraction: ExtractionConfig,
    /// Audit store settings
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl WayfinderConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports WAYFINDER_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("WAYFINDER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("WAYFINDER_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("WAYFINDER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("WAYFINDER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(landmarks) = std::env::var("WAYFINDER_LANDMARKS") {
            self.enrichment.landmarks_enabled = landmarks.to_lowercase() == "true";
        }
        if let Ok(mode) = std::env::var("WAYFINDER_TRAVEL_MODE") {
            if mode.parse::<TravelMode>().is_ok() {
                self.maps.travel_mode = mode.to_lowercase();
            }
        }

        self
    }

    /// Reject values the server cannot start with.
    ///
    /// Missing API keys are not validation errors; they surface per request
    /// as configuration failures so `/health` can still report them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "port must be non-zero"));
        }

        for (field, url) in [
            ("maps.directions_url", &self.maps.directions_url),
            ("maps.places_url", &self.maps.places_url),
            ("extraction.base_url", &self.extraction.base_url),
        ] {
            if url.trim().is_empty() {
                return Err(invalid(field, "URL cannot be empty"));
            }
        }

        self.maps
            .travel_mode
            .parse::<TravelMode>()
            .map_err(|message| invalid("maps.travel_mode", message))?;

        if self.enrichment.search_radius_m == 0 {
            return Err(invalid("enrichment.search_radius_m", "radius must be non-zero"));
        }
        if self.enrichment.max_concurrent_lookups == 0 {
            return Err(invalid(
                "enrichment.max_concurrent_lookups",
                "at least one concurrent lookup is required",
            ));
        }

        if let Some(level) = self.logging.invalid_level() {
            return Err(invalid(
                "logging.level",
                format!(
                    "unknown level '{}' (expected one of {})",
                    level,
                    logging::LOG_LEVELS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

//! Mapping and places provider configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Google Maps endpoints and credential lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    /// Directions API endpoint
    pub directions_url: String,
    /// Places Nearby Search endpoint
    pub places_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Travel mode requested from the provider (driving, walking, bicycling, transit)
    pub travel_mode: String,
    /// Deadline for a single directions request
    pub request_timeout_ms: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            directions_url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
            places_url: "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string(),
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            travel_mode: "driving".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl MapsConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        resolve_key(&self.api_key_env)
    }
}

pub(crate) fn resolve_key(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingCredential(var.to_string())),
    }
}

//! Google Maps client implementation.

use super::{
    DirectionsResponse, GeoPoint, MappingProvider, PlacesProvider, PlacesResponse, ProviderError,
    TravelMode,
};
use crate::config::MapsConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Google Maps client for both directions and nearby places.
///
/// - Directions via GET {directions_url}?origin=..&destination=..&mode=..&key=..
/// - Nearby search via GET {places_url}?location=lat,lng&radius=..&key=..
///
/// The API key is captured once at construction. A client built without one
/// answers every call with [`ProviderError::MissingCredential`].
pub struct GoogleMapsClient {
    directions_url: String,
    places_url: String,
    /// Environment variable the key was expected in, for error messages
    api_key_env: String,
    api_key: Option<String>,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl GoogleMapsClient {
    pub fn new(config: &MapsConfig, api_key: Option<String>, client: Arc<Client>) -> Self {
        Self {
            directions_url: config.directions_url.clone(),
            places_url: config.places_url.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
            timeout: Duration::from_millis(config.request_timeout_ms),
            client,
        }
    }

    /// Build a client, reading the key from the configured environment variable.
    pub fn from_config(config: &MapsConfig, client: Arc<Client>) -> Self {
        let api_key = config.resolve_api_key().ok();
        if api_key.is_none() {
            tracing::warn!(
                api_key_env = %config.api_key_env,
                "Maps API key not set; directions requests will fail"
            );
        }
        Self::new(config, api_key, client)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(self.api_key_env.clone()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(timeout_ms)
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse provider response: {}", e))
        })
    }
}

#[async_trait]
impl MappingProvider for GoogleMapsClient {
    fn name(&self) -> &str {
        "google-maps"
    }

    async fn get_route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DirectionsResponse, ProviderError> {
        let key = self.api_key()?;
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.as_str().to_string()),
            ("key", key.to_string()),
        ];

        tracing::debug!(origin, destination, mode = %mode, "Requesting directions");
        self.get_json(&self.directions_url, &params).await
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn search_nearby(
        &self,
        point: GeoPoint,
        radius_m: u32,
        categories: &[String],
    ) -> Result<PlacesResponse, ProviderError> {
        let key = self.api_key()?;
        let mut params = vec![
            ("location", point.to_query()),
            ("radius", radius_m.to_string()),
            ("key", key.to_string()),
        ];
        // Nearby Search accepts one type; wider allow-lists are filtered below.
        if let [only] = categories {
            params.push(("type", only.clone()));
        }

        let mut response: PlacesResponse = self.get_json(&self.places_url, &params).await?;

        if !categories.is_empty() {
            response
                .results
                .retain(|place| place.types.iter().any(|t| categories.contains(t)));
        }

        Ok(response)
    }
}

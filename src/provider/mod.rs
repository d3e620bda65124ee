//! Mapping and places provider abstraction.
//!
//! The pipeline never talks HTTP directly. It consumes a [`MappingProvider`]
//! for directions and a [`PlacesProvider`] for landmark lookups; the shipped
//! implementation of both is [`google::GoogleMapsClient`].
//!
//! # Cancellation Safety
//!
//! All async methods are cancellation-safe. Dropping a future aborts the
//! in-flight HTTP request.

use async_trait::async_trait;

pub mod error;
pub mod google;
pub mod types;

pub use error::ProviderError;
pub use google::GoogleMapsClient;
pub use types::{
    DirectionsResponse, GeoPoint, PlaceCandidate, PlacesResponse, RawStep, RouteLeg, StepMode,
    TransitDetails, TravelMode, STATUS_OK,
};

/// Source of precomputed routes.
#[async_trait]
pub trait MappingProvider: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Request directions between two free-form locations.
    ///
    /// # Returns
    ///
    /// - `Ok(DirectionsResponse)` whenever the provider answered with a parseable
    ///   body, whatever its `status`
    /// - `Err(ProviderError::MissingCredential)` if no API key is configured
    /// - `Err(ProviderError::Timeout | Network)` on transport failures
    /// - `Err(ProviderError::Upstream | InvalidResponse)` on HTTP or body errors
    async fn get_route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DirectionsResponse, ProviderError>;
}

/// Source of nearby points of interest.
#[async_trait]
pub trait PlacesProvider: Send + Sync + 'static {
    /// Search around `point`, returning candidates in the provider's ranking.
    ///
    /// Only candidates whose types intersect `categories` are returned; an
    /// empty allow-list disables the filter.
    async fn search_nearby(
        &self,
        point: GeoPoint,
        radius_m: u32,
        categories: &[String],
    ) -> Result<PlacesResponse, ProviderError>;
}

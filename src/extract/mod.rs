//! Free-text location extraction.
//!
//! Turns a sentence such as "take me from the station to the nearest coffee
//! shop" into an origin/destination pair. The shipped extractor delegates to
//! a Gemini model; the pipeline itself never depends on this module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod gemini;

pub use error::ExtractError;
pub use gemini::{parse_locations, GeminiExtractor};

/// Locations pulled out of a sentence. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLocations {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[async_trait]
pub trait LocationExtractor: Send + Sync + 'static {
    /// Extract locations from `text`.
    ///
    /// An answer without usable JSON is not an error; it yields empty fields.
    async fn extract(&self, text: &str) -> Result<ExtractedLocations, ExtractError>;
}

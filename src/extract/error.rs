//! Error types for location extraction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Missing API credential: set {0}")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Extraction service error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ExtractError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ExtractError::MissingCredential(_))
    }
}

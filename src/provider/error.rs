//! Error types for provider operations.

use thiserror::Error;

/// Errors that can occur while talking to the mapping or places provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No API key was available when the client was constructed.
    #[error("Missing API credential: set {0}")]
    MissingCredential(String),

    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Provider returned a non-success HTTP status.
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Whether this failure stems from configuration rather than the network.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ProviderError::MissingCredential(_))
    }
}

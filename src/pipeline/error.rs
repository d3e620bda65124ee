//! Error types for the route pipeline.

use super::types::FailureResult;
use crate::provider::ProviderError;
use thiserror::Error;

/// Classified outcome of a failed route fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteFailure {
    /// The provider answered but has no usable route.
    #[error("No route found: {message}")]
    NoRoute { message: String },

    /// Destination was empty; the provider was not called.
    #[error("Destination must not be empty")]
    EmptyDestination,

    /// Credential missing or otherwise misconfigured provider.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout, connection failure or unreadable response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<ProviderError> for RouteFailure {
    fn from(err: ProviderError) -> Self {
        if err.is_configuration() {
            RouteFailure::Configuration(err.to_string())
        } else {
            RouteFailure::Transport(err.to_string())
        }
    }
}

/// Errors surfaced to pipeline callers. "No route" never appears here; it is
/// answered with a fallback result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Directions provider unavailable: {0}")]
    Transport(String),
}

impl From<&PipelineError> for FailureResult {
    fn from(err: &PipelineError) -> Self {
        FailureResult {
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_classification() {
        let failure: RouteFailure = ProviderError::MissingCredential("KEY".to_string()).into();
        assert!(matches!(failure, RouteFailure::Configuration(_)));

        let failure: RouteFailure = ProviderError::Timeout(100).into();
        assert_eq!(
            failure,
            RouteFailure::Transport("Request timeout after 100ms".to_string())
        );

        let failure: RouteFailure = ProviderError::InvalidResponse("bad json".to_string()).into();
        assert!(matches!(failure, RouteFailure::Transport(_)));
    }

    #[test]
    fn test_failure_result_from_pipeline_error() {
        let err = PipelineError::Transport("Network error: refused".to_string());
        let failure = FailureResult::from(&err);
        assert_eq!(
            failure.error,
            "Directions provider unavailable: Network error: refused"
        );
    }
}

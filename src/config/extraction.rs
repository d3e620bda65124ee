//! Location extraction service configuration

use super::maps::resolve_key;
use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Gemini endpoint used to pull an origin/destination pair out of free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_ms: 15_000,
        }
    }
}

impl ExtractionConfig {
    /// Read the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        resolve_key(&self.api_key_env)
    }
}

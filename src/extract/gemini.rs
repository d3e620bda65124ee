//! Gemini-backed location extraction.

use super::{ExtractError, ExtractedLocations, LocationExtractor};
use crate::config::ExtractionConfig;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// First brace-delimited block, across lines. Models often wrap the JSON in
/// prose or code fences.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*?\}").expect("valid json block regex"));

fn build_prompt(text: &str) -> String {
    format!(
        "Extract the origin and destination from this sentence:\n\"{}\"\n\n\
         Only return a JSON object like this:\n\
         {{\n    \"origin\": \"origin name\",\n    \"destination\": \"destination name\"\n}}\n\n\
         No explanation. Only valid JSON.",
        text
    )
}

fn field(value: &serde_json::Value, name: &str) -> Option<String> {
    value
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the first JSON object found in a model reply.
///
/// No block, malformed JSON, or missing fields all give `None` for the
/// affected side.
pub fn parse_locations(reply: &str) -> ExtractedLocations {
    let Some(block) = JSON_BLOCK.find(reply) else {
        tracing::debug!("No JSON object in extraction reply");
        return ExtractedLocations::default();
    };

    match serde_json::from_str::<serde_json::Value>(block.as_str()) {
        Ok(value) => ExtractedLocations {
            origin: field(&value, "origin"),
            destination: field(&value, "destination"),
        },
        Err(e) => {
            tracing::debug!(error = %e, "Extraction reply is not valid JSON");
            ExtractedLocations::default()
        }
    }
}

/// Calls `{base_url}/v1beta/models/{model}:generateContent?key={key}`.
pub struct GeminiExtractor {
    base_url: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Arc<Client>,
}

impl GeminiExtractor {
    pub fn new(config: &ExtractionConfig, api_key: Option<String>, client: Arc<Client>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
            timeout: Duration::from_millis(config.timeout_ms),
            client,
        }
    }

    pub fn from_config(config: &ExtractionConfig, client: Arc<Client>) -> Self {
        let api_key = config.resolve_api_key().ok();
        if api_key.is_none() {
            tracing::warn!(
                api_key_env = %config.api_key_env,
                "Extraction API key not set; free-text requests will fail"
            );
        }
        Self::new(config, api_key, client)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl LocationExtractor for GeminiExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedLocations, ExtractError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ExtractError::MissingCredential(self.api_key_env.clone()))?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let timeout_ms = self.timeout.as_millis() as u64;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: build_prompt(text),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "Extracting locations");
        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::Timeout(timeout_ms)
                } else {
                    ExtractError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeminiResponse = response.json().await.map_err(|e| {
            ExtractError::InvalidResponse(format!("Failed to parse extraction response: {}", e))
        })?;

        let reply = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(parse_locations(reply.trim()))
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidate {
    content: GeminiContent,
}

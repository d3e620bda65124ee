//! `[logging]` section

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Level names accepted for `level` and component overrides.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Subscriber output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, colored output for a terminal
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {} (expected pretty or json)", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides keyed by top-level module, e.g. `pipeline = "debug"`
    /// becomes the directive `wayfinder::pipeline=debug`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
        }
    }
}

fn is_level(value: &str) -> bool {
    LOG_LEVELS.contains(&value.trim().to_lowercase().as_str())
}

impl LoggingConfig {
    /// Name of the first level string that `EnvFilter` would not accept as a
    /// bare level, if any.
    pub fn invalid_level(&self) -> Option<String> {
        if !is_level(&self.level) {
            return Some(self.level.clone());
        }
        self.component_levels
            .iter()
            .find(|(_, level)| !is_level(level))
            .map(|(component, level)| format!("{}={}", component, level))
    }
}

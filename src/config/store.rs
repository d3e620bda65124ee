//! Audit store configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Persist transcripts and directions results
    pub enabled: bool,
    /// Oldest records are evicted past this count
    pub max_records: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_records: 1_000,
        }
    }
}

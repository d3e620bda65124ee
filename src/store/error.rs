//! Error types for the audit store.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum MigrateError {
    /// Configuration rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Source key-value store could not be read
    #[error("Store error: {0}")]
    Store(String),

    /// network error
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// API answered with a failure status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Bearer token derivation failed
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    /// Record does not have the shape required by a rewrite
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl MigrateError {
    /// Whether it is expected behavior (bad input, malformed record, API refusal), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidConfig(_) | Self::InvalidRecord(_) => true,
            Self::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for MigrateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Core layer Result type alias
pub type MigrateResult<T> = std::result::Result<T, MigrateError>;

//! Common error types used across all tracelab crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all tracelab operations
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ChartError {
    // Wire-format errors
    #[error("Protocol violation: {message}")]
    Protocol { message: String },

    #[error("Invalid content type: expected {expected} but got {actual}")]
    ContentType { expected: String, actual: String },

    // Network errors
    #[error("Network request failed: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // Gesture/commit errors
    #[error("Gesture blocked: {message}")]
    Gesture { message: String },

    // Persistence errors
    #[error("Label persistence failed: {message}")]
    Persistence { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    /// A request superseded by the user's own navigation. Callers must
    /// treat this as a no-op, never as a user-visible failure.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ChartError {
    /// True when the condition came from superseding a request; the caller
    /// should silently drop the result.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChartError::Cancelled)
    }
}

/// Result type alias for tracelab operations
pub type Result<T> = std::result::Result<T, ChartError>;

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Persistence {
            message: err.to_string(),
        }
    }
}

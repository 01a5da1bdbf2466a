//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout basectl.
//! All errors are structured and map to specific error codes for JSON output.
//!
//! # Error Categories
//! - `Transport`: connection or response-parse failures, never retried
//! - `Api`: the remote service answered with a non-zero status code
//! - `NotFound`: a client-side lookup (e.g. table-by-name) found no match
//! - `InvalidInput`: malformed local input or missing required parameters
//! - `Config`: configuration file or credential resolution errors
//!
//! Validation failure is intentionally *not* an error: it is an expected
//! outcome and travels as a [`crate::validate::ValidationReport`] value.

use thiserror::Error;

/// Main error type for basectl operations
#[derive(Error, Debug)]
pub enum BasectlError {
    /// Connection or response-parse failure
    #[error("Transport failed: {0}")]
    Transport(String),

    /// The remote service responded with a non-zero status code.
    /// Carries the full parsed payload so callers can branch on the
    /// service's own code and message.
    #[error("API error {code}: {message}")]
    Api {
        code: i64,
        message: String,
        raw: serde_json::Value,
    },

    /// A client-side lookup found no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input or missing required parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (file not found, invalid JSON, missing env var, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BasectlError {
    /// Convert error to error code string for JSON output
    ///
    /// Error codes are stable and suitable for programmatic handling.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_FAILED",
            Self::Api { .. } => "API_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get human-readable error message (no credentials or tokens)
    ///
    /// This message is safe to include in JSON output.
    #[must_use]
    pub fn message(&self) -> String {
        // Use Display implementation from thiserror
        self.to_string()
    }

    /// The remote service's own status code, when this is an API error
    #[must_use]
    pub const fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an API error carrying the service's full response payload
    pub fn api(code: i64, message: impl Into<String>, raw: serde_json::Value) -> Self {
        Self::Api { code, message: message.into(), raw }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for basectl operations
pub type Result<T> = std::result::Result<T, BasectlError>;

//! JSON Output Envelope Types
//!
//! This module defines the structured JSON output format for all basectl
//! operations. Every run prints either a SuccessEnvelope or an ErrorEnvelope.
//!
//! # Output Contract
//! - Success: `{"ok": true, "base": "...", "command": "...", "data": {...}, "meta": {...}}`
//! - Error: `{"ok": false, "base": "...", "command": "...", "error": {"code": "...", "message": "..."}}`
//!
//! Output is stable and suitable for programmatic parsing.

use serde::{Deserialize, Serialize};

use crate::error::BasectlError;

/// Success envelope for operation results
///
/// Generic over the data type to support different operation return values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always true for success envelopes
    pub ok: bool,

    /// Identifier of the base the operation ran against
    pub base: String,

    /// Command that was executed (check, tables, validate, ...)
    pub command: String,

    /// Operation-specific data
    pub data: T,

    /// Execution metadata
    pub meta: Metadata,
}

impl<T> SuccessEnvelope<T> {
    /// Create a new success envelope
    pub fn new(
        base: impl Into<String>,
        command: impl Into<String>,
        data: T,
        meta: Metadata,
    ) -> Self {
        Self { ok: true, base: base.into(), command: command.into(), data, meta }
    }
}

/// Error envelope for operation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always false for error envelopes
    pub ok: bool,

    /// Base identifier (empty string when credentials never resolved)
    pub base: String,

    /// Command that was attempted
    pub command: String,

    /// Error information
    pub error: ErrorInfo,
}

impl ErrorEnvelope {
    /// Create a new error envelope
    pub fn new(base: impl Into<String>, command: impl Into<String>, error: ErrorInfo) -> Self {
        Self { ok: false, base: base.into(), command: command.into(), error }
    }

    /// Create error envelope from a [`BasectlError`]
    pub fn from_error(
        base: impl Into<String>,
        command: impl Into<String>,
        err: &BasectlError,
    ) -> Self {
        Self::new(
            base,
            command,
            ErrorInfo { code: err.error_code().to_string(), message: err.message() },
        )
    }
}

/// Error information structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code (e.g., "API_ERROR", "NOT_FOUND")
    pub code: String,

    /// Human-readable error message (no credentials or tokens)
    pub message: String,
}

impl ErrorInfo {
    /// Create a new error info
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

/// Execution metadata included in all success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Execution time in milliseconds
    pub execution_ms: u64,

    /// Number of records returned (for listing results, None otherwise)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_returned: Option<usize>,
}

impl Metadata {
    /// Create new metadata with just execution time
    pub fn new(execution_ms: u64) -> Self {
        Self { execution_ms, records_returned: None }
    }

    /// Create new metadata with execution time and record count
    pub fn with_records(execution_ms: u64, records_returned: usize) -> Self {
        Self { execution_ms, records_returned: Some(records_returned) }
    }
}

//! Basectl - Bootstrap and Administration Client for Remote Bases
//!
//! Basectl authenticates against a remote multi-table base service,
//! discovers or creates tables with typed column schemas, inserts and
//! queries records, and validates that a target dataset is correctly
//! configured before a downstream pipeline consumes it.
//!
//! # Core Principles
//! - Machine-first interface (JSON-only output)
//! - Explicit over implicit (every operation names its table and fields)
//! - Strictly sequential I/O (no two requests in flight concurrently)
//! - Failures carry the service's own code and payload unchanged
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`output`] - JSON output envelope types
//! - [`transport`] - Single-request JSON transport and response classification
//! - [`auth`] - Credentials and token lifecycle
//! - [`client`] - Table and record operations
//! - [`schema`] - Declarative table schema description
//! - [`validate`] - Record validation against declarative rules
//! - [`config`] - Credential resolution and storage
//!
//! # Public API
//! This library exports types and functions for use by the CLI and by
//! embedding callers:
//! - Core types: [`BaseClient`], [`Credentials`], [`TableSchema`], etc.
//! - Envelopes: [`SuccessEnvelope`], [`ErrorEnvelope`]
//! - Errors: [`BasectlError`]
//! - Functions: credential resolution and record validation

pub mod auth;      // Credentials and token lifecycle
pub mod client;    // Table and record operations
pub mod config;    // Credential resolution and storage
pub mod error;     // Error handling infrastructure
pub mod output;    // JSON output envelopes
pub mod schema;    // Declarative table schema description
pub mod transport; // HTTP transport and response classification
pub mod validate;  // Record validation rules

// Re-export commonly used types for convenience
pub use auth::{Credentials, TokenCache};
pub use client::{BaseClient, Record, Table};
pub use config::{load_credentials, save_credentials, ConfigLocation, StoredCredentials};
pub use error::{BasectlError, Result};
pub use output::{ErrorEnvelope, ErrorInfo, Metadata, SuccessEnvelope};
pub use schema::{FieldSchema, FieldType, SelectOption, TableSchema};
pub use transport::Transport;
pub use validate::{validate, Predicate, Rule, ValidationReport};

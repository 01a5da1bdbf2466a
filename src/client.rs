//! Base Client
//!
//! This module wraps the transport and token cache behind the table and
//! record operations of one remote base.
//!
//! # Stateless Operations
//! Every method is a one-shot sequential call chain: acquire a token from
//! the cache, issue the request(s), return domain objects. No two requests
//! are ever in flight concurrently, and no state is shared between calls
//! beyond the token cache.
//!
//! # Pagination
//! Listing endpoints return the first page only. If the service paginates,
//! later pages are not observed; the bases this tool administers stay far
//! below the page size.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::auth::{Credentials, TokenCache, INVALID_TOKEN_CODE};
use crate::error::{BasectlError, Result};
use crate::schema::{FieldSchema, TableSchema};
use crate::transport::Transport;

/// A table discovered within the base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Identifier assigned by the service
    pub table_id: String,

    /// Table name, unique within the base
    pub name: String,

    /// Service-side revision counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

/// A row of field-name/value pairs within a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Identifier assigned by the service
    pub record_id: String,

    /// Field values keyed by field name
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Success body wrapper: operations return their payload under `data`
#[derive(Debug, Deserialize)]
struct Payload<T> {
    data: T,
}

/// Listing payload shape shared by tables, fields, and records
#[derive(Debug, Deserialize)]
struct ItemPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CreatedTable {
    table_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    record: Record,
}

/// Client for the table and record operations of one base
///
/// Owns the transport, the credentials, and the token cache; tokens are
/// acquired per operation and refreshed transparently before expiry.
#[derive(Debug)]
pub struct BaseClient {
    transport: Transport,
    credentials: Credentials,
    tokens: TokenCache,
}

impl BaseClient {
    /// Create a client for the hosted service endpoint
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(credentials, Transport::new())
    }

    /// Create a client over a specific transport (e.g. a different endpoint)
    #[must_use]
    pub fn with_transport(credentials: Credentials, transport: Transport) -> Self {
        Self { transport, credentials, tokens: TokenCache::new() }
    }

    /// Identifier of the base this client administers
    #[must_use]
    pub fn base_id(&self) -> &str {
        &self.credentials.base_id
    }

    /// List the base's tables (first page)
    pub async fn list_tables(&self) -> Result<Vec<Table>> {
        let path = format!("/bitable/v1/apps/{}/tables", self.base_id());
        let payload: Payload<ItemPage<Table>> = self.request(Method::GET, &path, None).await?;
        Ok(payload.data.items)
    }

    /// Resolve a table id by exact name match
    ///
    /// Scans the table listing in service order and returns the first
    /// match; the base's name-uniqueness invariant makes ties impossible.
    /// Zero matches fail with [`BasectlError::NotFound`].
    pub async fn table_id_by_name(&self, name: &str) -> Result<String> {
        let tables = self.list_tables().await?;
        match_table(&tables, name)
            .map(|table| table.table_id.clone())
            .ok_or_else(|| {
                BasectlError::not_found(format!(
                    "table '{name}' not found in base {}",
                    self.base_id()
                ))
            })
    }

    /// List a table's field descriptors
    pub async fn fields(&self, table_id: &str) -> Result<Vec<FieldSchema>> {
        let path = format!("/bitable/v1/apps/{}/tables/{table_id}/fields", self.base_id());
        let payload: Payload<ItemPage<FieldSchema>> =
            self.request(Method::GET, &path, None).await?;
        Ok(payload.data.items)
    }

    /// List a table's records (first page)
    pub async fn list_records(&self, table_id: &str) -> Result<Vec<Record>> {
        let path = format!("/bitable/v1/apps/{}/tables/{table_id}/records", self.base_id());
        let payload: Payload<ItemPage<Record>> = self.request(Method::GET, &path, None).await?;
        Ok(payload.data.items)
    }

    /// Insert one record
    ///
    /// The field map is sent as-is; the service is the source of truth for
    /// field-type coercion, and an unknown field name or type mismatch
    /// surfaces as an API error.
    pub async fn create_record(
        &self,
        table_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Record> {
        let path = format!("/bitable/v1/apps/{}/tables/{table_id}/records", self.base_id());
        let body = json!({ "fields": fields });
        let payload: Payload<CreatedRecord> =
            self.request(Method::POST, &path, Some(&body)).await?;
        Ok(payload.data.record)
    }

    /// Overwrite fields of an existing record
    pub async fn update_record(
        &self,
        table_id: &str,
        record_id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let path = format!(
            "/bitable/v1/apps/{}/tables/{table_id}/records/{record_id}",
            self.base_id()
        );
        let body = json!({ "fields": fields });
        let _: Value = self.request(Method::PUT, &path, Some(&body)).await?;
        Ok(())
    }

    /// Create a table from a declarative schema and return its id
    ///
    /// The full field list goes up in one call; the service allocates the
    /// table and field ids atomically, so a failed creation leaves no table
    /// behind.
    pub async fn create_table(&self, schema: &TableSchema) -> Result<String> {
        let path = format!("/bitable/v1/apps/{}/tables", self.base_id());
        let body = schema.creation_body();
        let payload: Payload<CreatedTable> =
            self.request(Method::POST, &path, Some(&body)).await?;
        Ok(payload.data.table_id)
    }

    /// Delete a table by name
    ///
    /// Returns whether a table was actually deleted: an absent table is a
    /// soft no-op (`false`), since deletion is used for idempotent cleanup.
    /// Every other failure propagates.
    pub async fn delete_table(&self, name: &str) -> Result<bool> {
        let table_id = match self.table_id_by_name(name).await {
            Ok(table_id) => table_id,
            Err(BasectlError::NotFound(_)) => return Ok(false),
            Err(err) => return Err(err),
        };

        let path = format!("/bitable/v1/apps/{}/tables/{table_id}", self.base_id());
        let _: Value = self.request(Method::DELETE, &path, None).await?;
        Ok(true)
    }

    /// Issue one authorized request
    ///
    /// An invalid-token answer clears the cache so the next operation
    /// re-authenticates; the failure itself still propagates unchanged.
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let token = self.tokens.get(&self.transport, &self.credentials).await?;
        let result = self.transport.request(method, path, body, Some(&token)).await;

        if let Err(err) = &result {
            if err.api_code() == Some(INVALID_TOKEN_CODE) {
                self.tokens.invalidate().await;
            }
        }

        result
    }
}

/// Exact-match scan over a table listing
///
/// Returns the first table whose name matches; `None` when absent,
/// including over an empty listing.
fn match_table<'a>(tables: &'a [Table], name: &str) -> Option<&'a Table> {
    tables.iter().find(|table| table.name == name)
}

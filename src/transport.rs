//! HTTP Transport to the Remote Base Service
//!
//! This module issues single JSON requests against the service's REST API
//! and classifies every response as success or application-level failure.
//!
//! # Response Contract
//! Every response body is JSON with a top-level `code` field:
//! - `code == 0`: success; the body (including its `data` payload) is
//!   deserialized into the caller's response type
//! - any other code: application-level failure carrying the service's own
//!   code, message, and the full raw payload
//!
//! Connection failures and malformed JSON are a distinct transport failure
//! kind and are never conflated with application errors.
//!
//! # No Retries
//! A request runs to completion or failure exactly once. A caller observing
//! a failure decides whether to retry.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BasectlError, Result};

/// Default endpoint prefix for the hosted service
pub const DEFAULT_BASE_URL: &str = "https://open.larksuite.com/open-apis";

/// Single-request JSON transport
///
/// Holds the underlying HTTP client and the endpoint prefix. The transport
/// is stateless between calls; whatever bearer token a request needs is
/// passed in explicitly.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Create a transport against the default hosted endpoint
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a transport against a custom endpoint prefix
    ///
    /// The prefix must not end with a slash; paths passed to [`request`]
    /// start with one.
    ///
    /// [`request`]: Transport::request
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    /// Issue one request and deserialize the classified response body
    ///
    /// The body is serialized to JSON only when present. When a token is
    /// given it is attached as an `Authorization: Bearer` header; the HTTP
    /// layer supplies `Content-Type` and `Content-Length` for JSON bodies.
    ///
    /// On success the *full* response body is deserialized into `T` — the
    /// auth endpoint returns its token beside `code`/`msg` rather than under
    /// `data`, so response types declare exactly the fields they need.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.http.request(method, &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BasectlError::transport(format!("request to {path} failed: {e}")))?;

        let text = response.text().await.map_err(|e| {
            BasectlError::transport(format!("failed to read response from {path}: {e}"))
        })?;

        let parsed: Value = serde_json::from_str(&text).map_err(|e| {
            BasectlError::transport(format!("response from {path} is not valid JSON: {e}"))
        })?;

        let body = classify(parsed).map_err(|e| {
            // Diagnostic only; the structured error is what callers act on.
            eprintln!("Warning: request to {path} failed: {e}");
            e
        })?;

        serde_json::from_value(body).map_err(|e| {
            BasectlError::transport(format!("unexpected response shape from {path}: {e}"))
        })
    }
}

/// Split a parsed response body into success payload or application failure
///
/// `code == 0` yields the full body; any other code yields an [`Api`] error
/// carrying the service's code, message, and the unmodified payload. A body
/// without a numeric `code` field does not follow the service's envelope
/// contract and is treated as a transport failure.
///
/// [`Api`]: BasectlError::Api
fn classify(body: Value) -> Result<Value> {
    let code = body
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| BasectlError::transport("response has no top-level code field"))?;

    if code == 0 {
        Ok(body)
    } else {
        let message = body.get("msg").and_then(Value::as_str).unwrap_or("").to_string();
        Err(BasectlError::api(code, message, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_success_returns_full_body() {
        let body = json!({"code": 0, "msg": "success", "data": {"items": []}});
        let result = classify(body.clone()).unwrap();
        assert_eq!(result, body);
    }

    #[test]
    fn test_classify_nonzero_code_is_api_error() {
        let body = json!({"code": 91402, "msg": "NOTEXIST", "data": {}});
        let err = classify(body.clone()).unwrap_err();
        match err {
            BasectlError::Api { code, message, raw } => {
                assert_eq!(code, 91402);
                assert_eq!(message, "NOTEXIST");
                assert_eq!(raw, body);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_code_is_transport_error() {
        let body = json!({"unexpected": "shape"});
        let err = classify(body).unwrap_err();
        assert!(matches!(err, BasectlError::Transport(_)));
    }

    #[test]
    fn test_classify_non_numeric_code_is_transport_error() {
        let body = json!({"code": "0", "msg": "success"});
        let err = classify(body).unwrap_err();
        assert!(matches!(err, BasectlError::Transport(_)));
    }

    #[test]
    fn test_classify_error_without_msg() {
        let body = json!({"code": 1254000});
        let err = classify(body).unwrap_err();
        match err {
            BasectlError::Api { code, message, .. } => {
                assert_eq!(code, 1254000);
                assert_eq!(message, "");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_connection_failure_is_transport_error() {
        // Nothing listens on this port; the request must surface a
        // Transport error, not an Api error.
        let transport = Transport::with_base_url("http://127.0.0.1:9");
        let result: Result<Value> =
            transport.request(Method::GET, "/bitable/v1/apps/x/tables", None, None).await;
        assert!(matches!(result.unwrap_err(), BasectlError::Transport(_)));
    }
}

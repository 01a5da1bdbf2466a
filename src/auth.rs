//! Credential Exchange and Token Lifecycle
//!
//! This module exchanges long-lived application credentials for short-lived
//! tenant access tokens and owns their lifecycle.
//!
//! # Token Cache
//! Tokens are held in an internally-synchronized cache rather than passed
//! around as bare strings:
//! - acquired on first use
//! - reused while fresh, refreshed before the declared expiry (with a
//!   safety margin so a token is never used in its final seconds)
//! - cleared by [`TokenCache::invalidate`] when the service reports the
//!   token invalid, so the next operation re-authenticates
//!
//! There is no automatic retry: an operation that fails with an invalid
//! token surfaces that failure to its caller.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::transport::Transport;

/// Credential exchange endpoint
///
/// The response carries `tenant_access_token` and `expire` (seconds) at the
/// top level of the body, beside `code` and `msg`.
const TOKEN_PATH: &str = "/auth/v3/tenant_access_token/internal";

/// Seconds subtracted from the declared token lifetime before refresh
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Application status code the service uses for expired or invalid
/// tenant access tokens
pub const INVALID_TOKEN_CODE: i64 = 99991663;

/// Static application credentials
///
/// Immutable for the process lifetime. `base_id` addresses the multi-table
/// base every table and record operation runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Application identifier issued by the platform
    pub app_id: String,

    /// Application secret
    /// WARNING: Sensitive data, do not log or include in error messages
    pub app_secret: String,

    /// Identifier of the base to administer
    pub base_id: String,
}

impl Credentials {
    /// Create credentials from their three parts
    #[must_use]
    pub const fn new(app_id: String, app_secret: String, base_id: String) -> Self {
        Self { app_id, app_secret, base_id }
    }
}

/// Successful credential-exchange response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    tenant_access_token: String,
    /// Declared token lifetime in seconds
    expire: u64,
}

/// A cached token plus the instant it stops being trusted
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Owned, internally-synchronized token cache
///
/// One cache serves one credential set. All access goes through an async
/// mutex, so concurrent callers never race two credential exchanges.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Create an empty cache; the first [`get`] performs the exchange
    ///
    /// [`get`]: TokenCache::get
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a fresh bearer token, exchanging credentials if needed
    ///
    /// A cached token is reused while fresh. On exchange failure the
    /// service's payload propagates unchanged and the cache stays empty.
    pub async fn get(&self, transport: &Transport, credentials: &Credentials) -> Result<String> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.fresh() {
                return Ok(cached.token.clone());
            }
        }

        let body = json!({
            "app_id": credentials.app_id,
            "app_secret": credentials.app_secret,
        });
        let response: TokenResponse =
            transport.request(Method::POST, TOKEN_PATH, Some(&body), None).await?;

        let lifetime = response.expire.saturating_sub(EXPIRY_MARGIN_SECS);
        *slot = Some(CachedToken {
            token: response.tenant_access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });

        Ok(response.tenant_access_token)
    }

    /// Drop the cached token so the next [`get`] re-authenticates
    ///
    /// [`get`]: TokenCache::get
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// Whether a fresh token is currently cached
    pub async fn has_fresh_token(&self) -> bool {
        self.slot.lock().await.as_ref().is_some_and(CachedToken::fresh)
    }

    #[cfg(test)]
    async fn seed(&self, token: &str, lifetime: Duration) {
        *self.slot.lock().await = Some(CachedToken {
            token: token.to_string(),
            expires_at: Instant::now() + lifetime,
        });
    }
}

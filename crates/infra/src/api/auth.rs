//! API authentication with client-credential token management
//!
//! Exchanges the client id and secret for a bearer token, caches it, and
//! refreshes it shortly before it expires.

use std::sync::Arc;

use async_trait::async_trait;
use monta_domain::constants::{PATH_AUTH_REFRESH, PATH_AUTH_TOKEN};
use monta_domain::{ClientConfig, Credentials, MontaError, Result, TokenSet};
use reqwest::Method;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::request::{json_request, read_json};
use crate::http::HttpSession;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String>;
}

/// Token supplied and refreshed by the caller
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wrap a token the caller obtained elsewhere. An empty token fails
    /// every call with `MontaError::Auth`.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(MontaError::Auth("No access token configured".into()));
        }
        Ok(self.token.clone())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Cached token and the refresh threshold that applies to it
#[derive(Clone)]
struct CachedToken {
    token: TokenSet,
    threshold_secs: i64,
}

impl CachedToken {
    /// A freshly issued token; the threshold is capped at half its lifetime
    fn issued(token: TokenSet, configured_secs: i64) -> Self {
        let half_life = token.seconds_until_expiry().max(0) / 2;
        Self { threshold_secs: configured_secs.min(half_life), token }
    }

    /// A token supplied by the caller, whose lifetime is unknown
    fn seeded(token: TokenSet, configured_secs: i64) -> Self {
        Self { token, threshold_secs: configured_secs }
    }
}

/// Client-credentials auth service with an in-memory token cache
pub struct MontaAuthService {
    session: Arc<dyn HttpSession>,
    credentials: Credentials,
    config: ClientConfig,
    tokens: RwLock<Option<CachedToken>>,
}

impl MontaAuthService {
    /// Create a new auth service
    ///
    /// # Errors
    ///
    /// Returns `MontaError::InvalidInput` if the client id or secret is empty
    /// and `MontaError::Config` if `config` is invalid.
    pub fn new(
        credentials: Credentials,
        session: Arc<dyn HttpSession>,
        config: ClientConfig,
    ) -> Result<Self> {
        if !credentials.is_complete() {
            return Err(MontaError::InvalidInput(
                "Client id and client secret must both be non-empty".into(),
            ));
        }
        config.validate()?;

        Ok(Self { session, credentials, config, tokens: RwLock::new(None) })
    }

    /// Seed the cache with a previously issued token (e.g. one the caller
    /// persisted from [`current_token`](Self::current_token))
    pub fn with_token(mut self, token: TokenSet) -> Self {
        let threshold = self.config.token_refresh_threshold_secs;
        self.tokens = RwLock::new(Some(CachedToken::seeded(token, threshold)));
        self
    }

    /// Snapshot of the cached token, if any
    pub async fn current_token(&self) -> Option<TokenSet> {
        self.tokens.read().await.as_ref().map(|cached| cached.token.clone())
    }

    /// Drop the cached token so the next call re-authenticates
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
    }

    /// Exchange the client credentials for a fresh token, replacing the cache
    ///
    /// # Errors
    ///
    /// Returns `MontaError::Auth` if the credentials are rejected.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<TokenSet> {
        let token = self.request_token().await?;
        self.store(token.clone()).await;
        Ok(token)
    }

    async fn request_token(&self) -> Result<TokenSet> {
        debug!(client_id = %self.credentials.client_id, "Requesting access token");

        let url = self.config.endpoint(PATH_AUTH_TOKEN);
        let request = json_request(Method::POST, &url, &[], None, Some(&self.credentials))?;
        let response = self.session.send(request).await?;
        let token: TokenSet = read_json(response).await.map_err(as_auth_failure)?;

        info!(expires_in = token.seconds_until_expiry(), "Access token obtained");
        Ok(token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet> {
        debug!("Refreshing access token");

        let url = self.config.endpoint(PATH_AUTH_REFRESH);
        let body = RefreshRequest { refresh_token };
        let request = json_request(Method::POST, &url, &[], None, Some(&body))?;
        let response = self.session.send(request).await?;
        let token: TokenSet = read_json(response).await.map_err(as_auth_failure)?;

        info!(expires_in = token.seconds_until_expiry(), "Access token refreshed");
        Ok(token)
    }

    async fn store(&self, token: TokenSet) {
        let cached = CachedToken::issued(token, self.config.token_refresh_threshold_secs);
        debug!(threshold_secs = cached.threshold_secs, "Caching access token");
        *self.tokens.write().await = Some(cached);
    }

    /// Refresh if the cached refresh token is still usable, else log in again
    async fn renew(&self, cached: Option<TokenSet>) -> Result<TokenSet> {
        if let Some(cached) = cached.filter(|t| !t.is_refresh_token_expired(0)) {
            match self.refresh(&cached.refresh_token).await {
                Ok(token) => return Ok(token),
                Err(MontaError::Auth(reason)) => {
                    warn!(%reason, "Refresh token rejected, falling back to client credentials");
                }
                Err(err) => return Err(err),
            }
        }
        self.request_token().await
    }
}

#[async_trait]
impl AccessTokenProvider for MontaAuthService {
    async fn access_token(&self) -> Result<String> {
        let cached = self.tokens.read().await.clone();
        if let Some(CachedToken { token, threshold_secs }) = &cached {
            if !token.is_access_token_expired(*threshold_secs) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.renew(cached.map(|c| c.token)).await?;
        let access = token.access_token.clone();
        self.store(token).await;
        Ok(access)
    }
}

/// The token endpoints answer bad credentials with 400/401/403 depending on
/// the failure; every client-side rejection there is an auth failure.
fn as_auth_failure(err: MontaError) -> MontaError {
    match err {
        MontaError::Api { status, message } if (400..500).contains(&status) => {
            MontaError::Auth(message)
        }
        MontaError::NotFound(message) => MontaError::Auth(message),
        MontaError::Decode(message) => {
            MontaError::Auth(format!("Token response could not be decoded: {}", message))
        }
        other => other,
    }
}

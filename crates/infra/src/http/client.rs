//! Configured reqwest session and the `HttpSession` seam
//!
//! Requests are sent exactly once; status codes are left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use monta_domain::{ClientConfig, MontaError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Request, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Minimal request/response capability the API client needs
///
/// Implementations own connection pooling, TLS and timeouts. A transport
/// failure must come back as `MontaError::Network` (or `Config` for a request
/// that could not be built); HTTP error statuses are returned as ordinary
/// responses and classified by the caller.
#[async_trait]
pub trait HttpSession: Send + Sync {
    /// Send a fully built request and return the raw response
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl HttpSession for ReqwestClient {
    async fn send(&self, request: Request) -> Result<Response> {
        self.execute(request).await.map_err(|err| MontaError::from(InfraError::from(err)))
    }
}

/// Pre-configured HTTP session with timeout and user agent applied.
///
/// Sends each request exactly once. Proxy environment variables are not
/// consulted; inject a `reqwest::Client` configured with a proxy instead.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Build a session using the timeout and user agent from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder().timeout(config.timeout).user_agent(config.user_agent.clone()).build()
    }

    /// Underlying reqwest client, for callers that also talk to other hosts.
    pub fn inner(&self) -> &ReqwestClient {
        &self.client
    }
}

#[async_trait]
impl HttpSession for HttpClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        let defaults = ClientConfig::default();
        Self { timeout: defaults.timeout, user_agent: Some(defaults.user_agent), default_headers: None }
    }
}

impl HttpClientBuilder {
    /// Total timeout for each request, connect through body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Extra headers sent with every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Build the session.
    ///
    /// # Errors
    /// Returns `MontaError::Config` if reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| MontaError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}

//! Client configuration
//!
//! Credentials are deliberately absent: they are passed to the client
//! constructor and never read from configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS, DEFAULT_USER_AGENT, MAX_PAGE_SIZE,
};
use crate::errors::{MontaError, Result};

/// Settings for `MontaApiClient` and its HTTP session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for the API (e.g., "https://public-api.monta.com/api/v1")
    pub base_url: String,
    /// Request timeout applied to sessions built from this config
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub user_agent: String,
    /// `perPage` sent on list endpoints
    pub page_size: u32,
    /// Seconds before expiry at which a cached token is considered stale
    ///
    /// For tokens issued by the auth endpoints this is capped at half the
    /// token's lifetime, so short-lived tokens are still reused.
    pub token_refresh_threshold_secs: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            token_refresh_threshold_secs: DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS,
        }
    }
}

impl ClientConfig {
    /// Config pointing at a different base URL, everything else default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `MontaError::Config` if the base URL is not an absolute
    /// http(s) URL, the page size is outside `1..=100`, the timeout is zero,
    /// or the refresh threshold is negative.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| MontaError::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MontaError::Config(format!(
                "Unsupported base URL scheme: {}",
                url.scheme()
            )));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(MontaError::Config(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.timeout.is_zero() {
            return Err(MontaError::Config("Timeout must be greater than zero".to_string()));
        }

        if self.token_refresh_threshold_secs < 0 {
            return Err(MontaError::Config(format!(
                "Token refresh threshold must not be negative, got {}",
                self.token_refresh_threshold_secs
            )));
        }

        Ok(())
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

//! Configuration loader
//!
//! Builds a [`ClientConfig`] from defaults overlaid with environment
//! variables. Unset variables keep their defaults; set but malformed ones are
//! an error. Credentials are never read here.
//!
//! ## Environment Variables
//! - `MONTA_BASE_URL`: API base URL
//! - `MONTA_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `MONTA_USER_AGENT`: User-Agent header for the built-in session
//! - `MONTA_PAGE_SIZE`: `perPage` for list endpoints (1-100)
//! - `MONTA_TOKEN_REFRESH_THRESHOLD_SECS`: refresh tokens this long before
//!   expiry

use std::str::FromStr;
use std::time::Duration;

use monta_domain::{ClientConfig, MontaError, Result};

pub const ENV_BASE_URL: &str = "MONTA_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MONTA_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "MONTA_USER_AGENT";
pub const ENV_PAGE_SIZE: &str = "MONTA_PAGE_SIZE";
pub const ENV_TOKEN_REFRESH_THRESHOLD_SECS: &str = "MONTA_TOKEN_REFRESH_THRESHOLD_SECS";

/// Load configuration from the process environment
///
/// # Errors
/// Returns `MontaError::Config` if a variable is set but cannot be parsed, or
/// the resulting configuration fails validation.
pub fn load_from_env() -> Result<ClientConfig> {
    let config = load_from_lookup(|key| std::env::var(key).ok())?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded from environment");
    Ok(config)
}

/// Load configuration from an arbitrary key lookup
///
/// `lookup` returns the raw value for a variable name, or `None` when unset.
/// Empty values count as unset.
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_lookup<F>(lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = ClientConfig::default();

    if let Some(base_url) = get(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(raw) = get(ENV_TIMEOUT_SECS) {
        config.timeout = Duration::from_secs(parse_var(ENV_TIMEOUT_SECS, &raw)?);
    }
    if let Some(user_agent) = get(ENV_USER_AGENT) {
        config.user_agent = user_agent;
    }
    if let Some(raw) = get(ENV_PAGE_SIZE) {
        config.page_size = parse_var(ENV_PAGE_SIZE, &raw)?;
    }
    if let Some(raw) = get(ENV_TOKEN_REFRESH_THRESHOLD_SECS) {
        config.token_refresh_threshold_secs = parse_var(ENV_TOKEN_REFRESH_THRESHOLD_SECS, &raw)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a variable's value
///
/// # Errors
/// Returns `MontaError::Config` naming the variable if parsing fails.
fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| MontaError::Config(format!("Invalid {}='{}': {}", key, raw, e)))
}

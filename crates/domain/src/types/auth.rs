//! Authentication types
//!
//! The API issues short-lived access tokens in exchange for a client id and
//! secret, plus a longer-lived refresh token.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime::required;

/// API client credentials
///
/// Serializes to the body expected by the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    /// Both halves present
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Access and refresh tokens returned by `/auth/token` and `/auth/refresh`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub access_token: String,
    #[serde(with = "required")]
    pub access_token_expiration_date: DateTime<Utc>,
    pub refresh_token: String,
    #[serde(with = "required")]
    pub refresh_token_expiration_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl TokenSet {
    /// Check if the access token is expired or will expire within
    /// `threshold_seconds`
    pub fn is_access_token_expired(&self, threshold_seconds: i64) -> bool {
        Utc::now() + Duration::seconds(threshold_seconds) >= self.access_token_expiration_date
    }

    /// Check if the refresh token is expired or will expire within
    /// `threshold_seconds`
    pub fn is_refresh_token_expired(&self, threshold_seconds: i64) -> bool {
        Utc::now() + Duration::seconds(threshold_seconds) >= self.refresh_token_expiration_date
    }

    /// Seconds until the access token expires (negative once expired)
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.access_token_expiration_date - Utc::now()).num_seconds()
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("access_token_expiration_date", &self.access_token_expiration_date)
            .field("refresh_token", &"[REDACTED]")
            .field("refresh_token_expiration_date", &self.refresh_token_expiration_date)
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token_expiring_in(access_secs: i64, refresh_secs: i64) -> TokenSet {
        TokenSet {
            access_token: "access".into(),
            access_token_expiration_date: Utc::now() + Duration::seconds(access_secs),
            refresh_token: "refresh".into(),
            refresh_token_expiration_date: Utc::now() + Duration::seconds(refresh_secs),
            user_id: None,
        }
    }

    #[test]
    fn decodes_token_response() {
        let token: TokenSet = serde_json::from_value(json!({
            "accessToken": "abc",
            "accessTokenExpirationDate": "2030-01-01T00:00:00Z",
            "refreshToken": "def",
            "refreshTokenExpirationDate": "2030-02-01T00:00:00Z",
            "userId": "user-1"
        }))
        .unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token, "def");
        assert_eq!(token.user_id.as_deref(), Some("user-1"));
        assert!(!token.is_access_token_expired(300));
    }

    #[test]
    fn rejects_token_without_expiry() {
        let result: Result<TokenSet, _> = serde_json::from_value(json!({
            "accessToken": "abc",
            "accessTokenExpirationDate": "soon",
            "refreshToken": "def",
            "refreshTokenExpirationDate": "2030-02-01T00:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn expiry_honours_threshold() {
        let token = token_expiring_in(120, 86_400);
        assert!(!token.is_access_token_expired(0));
        assert!(token.is_access_token_expired(300));
        assert!(!token.is_refresh_token_expired(300));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let token = token_expiring_in(60, 60);
        let creds = Credentials::new("id", "super-secret");
        assert!(!format!("{token:?}").contains("access\""));
        assert!(!format!("{creds:?}").contains("super-secret"));
    }

    #[test]
    fn credentials_serialize_for_token_endpoint() {
        let body = serde_json::to_value(Credentials::new("cid", "csecret")).unwrap();
        assert_eq!(body, json!({ "clientId": "cid", "clientSecret": "csecret" }));
    }

    #[test]
    fn incomplete_credentials() {
        assert!(!Credentials::new("", "secret").is_complete());
        assert!(!Credentials::new("id", "  ").is_complete());
        assert!(Credentials::new("id", "secret").is_complete());
    }
}

//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a [`MontaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Credentials rejected or no usable token (401, 403, failed exchange)
    Authentication,
    /// Transport failure before a complete response was received
    Network,
    /// The API answered, but not with what was asked for
    Api,
    /// Invalid configuration or caller input, detected locally
    Config,
}

/// Main error type for Monta API operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MontaError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MontaError {
    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::Network(_) => ErrorCategory::Network,
            Self::Api { .. } | Self::NotFound(_) | Self::Decode(_) => ErrorCategory::Api,
            Self::Config(_) | Self::InvalidInput(_) => ErrorCategory::Config,
        }
    }

    /// HTTP status carried by the error, when the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for Monta operations
pub type Result<T> = std::result::Result<T, MontaError>;

//! Conversions from external infrastructure errors into domain errors.

use monta_domain::MontaError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MontaError);

impl From<InfraError> for MontaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MontaError> for InfraError {
    fn from(value: MontaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMontaError {
    fn into_monta(self) -> MontaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MontaError */
/* -------------------------------------------------------------------------- */

impl IntoMontaError for HttpError {
    fn into_monta(self) -> MontaError {
        if self.is_timeout() {
            return MontaError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return MontaError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return MontaError::Decode(format!("failed to decode response body: {self}"));
        }

        if self.is_builder() {
            return MontaError::Config(format!("invalid HTTP request: {self}"));
        }

        MontaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_monta())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MontaError */
/* -------------------------------------------------------------------------- */

impl IntoMontaError for JsonError {
    fn into_monta(self) -> MontaError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => MontaError::Network(format!("failed to read response body: {self}")),
            Category::Syntax | Category::Eof => {
                MontaError::Decode(format!("response body is not valid JSON: {self}"))
            }
            Category::Data => {
                MontaError::Decode(format!("unexpected response payload shape: {self}"))
            }
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_monta())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

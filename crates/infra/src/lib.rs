//! # Monta Infrastructure
//!
//! Async client for the Monta EV-charging API.
//!
//! This crate contains:
//! - [`MontaApiClient`](api::MontaApiClient), one method per endpoint
//! - Token acquisition and refresh ([`api::MontaAuthService`])
//! - The [`HttpSession`](http::HttpSession) seam and a configured reqwest
//!   session
//! - Environment-based configuration loading
//!
//! ## Architecture
//! - Value objects and errors come from `monta-domain`
//! - All I/O lives here

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ChargeFilter, MontaApiClient, MontaApiClientBuilder, MontaAuthService,
    StaticTokenProvider, TransactionFilter,
};
pub use http::{HttpClient, HttpClientBuilder, HttpSession};

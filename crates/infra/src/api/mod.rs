//! Monta API client
//!
//! HTTP-based client for the Monta public API: charge points, charges, and
//! the personal wallet.
//!
//! # Architecture
//!
//! - Transport through an injected [`HttpSession`](crate::http::HttpSession)
//! - Bearer tokens from an [`AccessTokenProvider`]; the default
//!   [`MontaAuthService`] exchanges client credentials and refreshes tokens
//! - Non-success statuses classified into `MontaError` variants, never
//!   retried

pub mod auth;
pub mod client;
pub mod filters;
mod request;

pub use auth::{AccessTokenProvider, MontaAuthService, StaticTokenProvider};
pub use client::{MontaApiClient, MontaApiClientBuilder};
pub use filters::{ChargeFilter, TransactionFilter};

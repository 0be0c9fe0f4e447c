//! HTTP session abstraction
//!
//! The API client never owns its transport. Callers hand it anything that
//! implements [`HttpSession`]: a plain `reqwest::Client`, the configured
//! [`HttpClient`] wrapper, or a test double.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, HttpSession};

//! # Monta Domain
//!
//! Value objects and error types for the Monta public API.
//!
//! This crate contains:
//! - Charge point, charge, and wallet records decoded from API responses
//! - Authentication token types
//! - Client configuration
//! - The `MontaError` type and `Result` alias
//!
//! ## Architecture
//! - No dependencies on other Monta crates
//! - No I/O: every type here is built from an already-decoded payload

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

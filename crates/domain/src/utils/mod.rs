//! Decoding helpers shared by the value objects

pub mod datetime;
pub mod serde_helpers;

pub use datetime::parse_datetime;

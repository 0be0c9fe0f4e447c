//! Configuration loading
//!
//! Overlays environment variables on the default `ClientConfig`.

pub mod loader;

// Re-export commonly used items
pub use loader::{load_from_env, load_from_lookup};

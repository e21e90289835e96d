//! Value objects representing immutable domain concepts.

pub mod secret;
pub mod validity;

// Re-export commonly used types
pub use secret::SigningSecret;
pub use validity::{parse_validity, TokenValidity};

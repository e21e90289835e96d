//! Error type definitions for token handling and input validation

use thiserror::Error;

/// Token-related errors
///
/// Every verification failure (signature, encoding, algorithm, expiry) is
/// reported as `InvalidToken` so callers cannot tell which check failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid duration format: {input}")]
    InvalidDuration { input: String },
}

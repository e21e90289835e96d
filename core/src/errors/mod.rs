//! Domain-specific error types and error handling.

mod types;

pub use types::{TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Signing secret missing or empty; tokens must not be issued or verified
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for the opaque verification failure
    pub fn invalid_token() -> Self {
        DomainError::Token(TokenError::InvalidToken)
    }

    /// Whether this error is the opaque verification failure
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::InvalidToken))
    }

    /// Whether this error is a missing-secret configuration failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::Configuration { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

//! Symmetric key material for token signatures

use std::fmt;

use crate::errors::{DomainError, DomainResult};

/// Non-empty signing secret; its contents never appear in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wraps secret bytes, rejecting an empty secret
    pub fn new(bytes: impl Into<Vec<u8>>) -> DomainResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::Configuration {
                message: "Secret key is required for authentication".to_string(),
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret([REDACTED; {} bytes])", self.0.len())
    }
}

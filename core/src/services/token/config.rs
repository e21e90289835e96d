//! Configuration for the token service

use auth_shared::config::{AuthConfig, CookieConfig, DEFAULT_TOKEN_VALIDITY};
use std::fmt;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Signing secret; must be non-empty
    pub secret: Vec<u8>,
    /// Validity applied when a caller passes none (`<number><s|m|h|d>`)
    pub default_validity: String,
    /// Attributes of the cookie carrier
    pub cookie: CookieConfig,
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            default_validity: DEFAULT_TOKEN_VALIDITY.to_string(),
            cookie: CookieConfig::default(),
        }
    }

    pub fn with_default_validity(mut self, validity: impl Into<String>) -> Self {
        self.default_validity = validity.into();
        self
    }

    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt.secret.as_bytes().to_vec(),
            default_validity: config.jwt.default_validity.clone(),
            cookie: config.cookie.clone(),
        }
    }
}

impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"[REDACTED]")
            .field("default_validity", &self.default_validity)
            .field("cookie", &self.cookie)
            .finish()
    }
}

//! Authentication configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Name of the cookie carrying the signed token
pub const DEFAULT_COOKIE_NAME: &str = "auth_token";

/// Token validity used when neither configuration nor caller supplies one
pub const DEFAULT_TOKEN_VALIDITY: &str = "1h";

/// Token signing configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign and verify tokens
    pub secret: String,

    /// Default token validity (`<number><s|m|h|d>`)
    #[serde(default = "default_validity")]
    pub default_validity: String,
}

impl JwtConfig {
    /// Create a new token configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            default_validity: default_validity(),
        }
    }

    /// Set the default token validity
    pub fn with_default_validity(mut self, validity: impl Into<String>) -> Self {
        self.default_validity = validity.into();
        self
    }

    /// Whether a non-empty secret is present
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("default_validity", &self.default_validity)
            .finish()
    }
}

/// `SameSite` cookie attribute; only `Lax` or stricter is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SameSite {
    #[serde(alias = "lax")]
    Lax,
    #[serde(alias = "strict")]
    Strict,
}

impl Default for SameSite {
    fn default() -> Self {
        SameSite::Lax
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Lax => write!(f, "Lax"),
            SameSite::Strict => write!(f, "Strict"),
        }
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            _ => Err(format!("Invalid SameSite value: {}", s)),
        }
    }
}

/// Configurable attributes of the cookie carrying the token
///
/// `Path=/`, `Secure` and `HttpOnly` are always set on the cookie and cannot
/// be configured; unknown keys such as `secure` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CookieConfig {
    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Cookie domain; host-only when unset
    #[serde(default)]
    pub domain: Option<String>,

    /// SameSite attribute
    #[serde(default)]
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            domain: None,
            same_site: SameSite::Lax,
        }
    }
}

impl CookieConfig {
    /// Use `SameSite=Strict`
    pub fn strict(mut self) -> Self {
        self.same_site = SameSite::Strict;
        self
    }

    /// Scope the cookie to a domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create a configuration with the given secret and default attributes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig::new(secret),
            cookie: CookieConfig::default(),
        }
    }

    /// Create from environment variables
    ///
    /// `AUTH_SECRET` is required. `AUTH_TOKEN_VALIDITY`, `AUTH_COOKIE_SAMESITE`
    /// and `AUTH_COOKIE_DOMAIN` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("AUTH_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingVar {
                key: "AUTH_SECRET".to_string(),
            })?;

        let mut jwt = JwtConfig::new(secret);
        if let Some(validity) = lookup("AUTH_TOKEN_VALIDITY") {
            jwt.default_validity = validity;
        }

        let mut cookie = CookieConfig::default();
        if let Some(same_site) = lookup("AUTH_COOKIE_SAMESITE") {
            cookie.same_site = same_site.parse().map_err(|_| ConfigError::InvalidValue {
                key: "AUTH_COOKIE_SAMESITE".to_string(),
                value: same_site.clone(),
            })?;
        }
        cookie.domain = lookup("AUTH_COOKIE_DOMAIN").filter(|d| !d.is_empty());

        Ok(Self { jwt, cookie })
    }

    /// Reject configurations that must never be used to sign tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.jwt.has_secret() {
            return Err(ConfigError::MissingVar {
                key: "auth.jwt.secret".to_string(),
            });
        }
        Ok(())
    }
}

fn default_validity() -> String {
    String::from(DEFAULT_TOKEN_VALIDITY)
}

fn default_cookie_name() -> String {
    String::from(DEFAULT_COOKIE_NAME)
}

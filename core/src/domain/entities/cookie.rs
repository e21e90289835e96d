//! Client-side token carrier.

use auth_shared::config::{CookieConfig, SameSite};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// `Expires` attribute format (IMF-fixdate, RFC 7231)
pub const COOKIE_EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Path scope of the cookie; the token is valid for the whole site
pub const COOKIE_PATH: &str = "/";

/// How far in the past a clearing cookie expires
const CLEARING_OFFSET_SECONDS: i64 = 3600;

/// Cookie holding the signed token on the client
///
/// Always rendered with `Path=/`, `Secure` and `HttpOnly`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub domain: Option<String>,
    pub same_site: SameSite,
}

impl AuthCookie {
    /// Cookie carrying `token` until `expires`
    pub fn with_token(config: &CookieConfig, token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            name: config.name.clone(),
            value: token.into(),
            expires,
            domain: config.domain.clone(),
            same_site: config.same_site,
        }
    }

    /// Cookie instructing the client to drop its token
    pub fn clearing(config: &CookieConfig, now: DateTime<Utc>) -> Self {
        Self::with_token(config, String::new(), now - Duration::seconds(CLEARING_OFFSET_SECONDS))
    }

    /// Whether this cookie removes the client's token
    pub fn is_clearing(&self) -> bool {
        self.value.is_empty()
    }

    /// Renders the `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Expires={}; Path={}",
            self.name,
            self.value,
            self.expires.format(COOKIE_EXPIRES_FORMAT),
            COOKIE_PATH
        );
        if let Some(ref domain) = self.domain {
            header.push_str("; Domain=");
            header.push_str(domain);
        }
        header.push_str("; Secure; HttpOnly; SameSite=");
        header.push_str(&self.same_site.to_string());
        header
    }
}

impl fmt::Display for AuthCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

//! Response carrier that buffers cookies and redirects until the host flushes them

use crate::domain::entities::cookie::AuthCookie;

use super::r#trait::ResponseCarrier;

/// Records cookie writes and the redirect target for one response
#[derive(Debug, Clone, Default)]
pub struct BufferedResponse {
    committed: bool,
    cookies: Vec<AuthCookie>,
    redirect: Option<String>,
}

impl BufferedResponse {
    /// A response whose headers are still open
    pub fn new() -> Self {
        Self::default()
    }

    /// A response whose headers have already been sent
    pub fn committed() -> Self {
        Self {
            committed: true,
            ..Self::default()
        }
    }

    /// Marks the header section as sent
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// Every cookie written, in order
    pub fn cookies(&self) -> &[AuthCookie] {
        &self.cookies
    }

    /// The most recent cookie written under `name`
    pub fn last_cookie(&self, name: &str) -> Option<&AuthCookie> {
        self.cookies.iter().rev().find(|c| c.name == name)
    }

    /// Redirect target requested by the last `redirect` call
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// `Set-Cookie` header values, in write order
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies.iter().map(AuthCookie::to_header_value).collect()
    }
}

impl ResponseCarrier for BufferedResponse {
    fn headers_sent(&self) -> bool {
        self.committed
    }

    fn set_cookie(&mut self, cookie: AuthCookie) {
        self.cookies.push(cookie);
    }

    fn redirect(&mut self, target: &str) {
        self.redirect = Some(target.to_string());
    }
}

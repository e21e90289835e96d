//! Response transport trait used to write the cookie carrier.

use crate::domain::entities::cookie::AuthCookie;

/// Response-side capabilities the host application exposes for one request
pub trait ResponseCarrier {
    /// Whether the header section has already been committed to the client
    ///
    /// Once this returns `true`, cookie writes are skipped.
    fn headers_sent(&self) -> bool;

    /// Adds a `Set-Cookie` header for `cookie`
    fn set_cookie(&mut self, cookie: AuthCookie);

    /// Asks the host to redirect the client to `target`
    fn redirect(&mut self, target: &str);
}

impl<R: ResponseCarrier + ?Sized> ResponseCarrier for &mut R {
    fn headers_sent(&self) -> bool {
        (**self).headers_sent()
    }

    fn set_cookie(&mut self, cookie: AuthCookie) {
        (**self).set_cookie(cookie)
    }

    fn redirect(&mut self, target: &str) {
        (**self).redirect(target)
    }
}

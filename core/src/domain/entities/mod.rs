//! Domain entities carried between requests.

pub mod cookie;
pub mod identity;
pub mod token;


// Re-export commonly used types
pub use cookie::{AuthCookie, COOKIE_EXPIRES_FORMAT, COOKIE_PATH};
pub use identity::UserIdentity;
pub use token::{TokenClaims, SESSION_PAYLOAD_KEY};

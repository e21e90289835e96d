//! Carriers moving the authenticated identity between requests.
//!
//! The host application supplies both: a per-client session store and a
//! response transport that can set cookies and redirect.

pub mod response;
pub mod session;

pub use response::{BufferedResponse, ResponseCarrier};
pub use session::{InMemorySession, SessionRegistry, SessionStore};

//! # Session Auth Core
//!
//! Issues, verifies and refreshes signed, time-limited tokens and keeps the
//! authenticated identity in two carriers: a server-side session mirror and a
//! client-side cookie. Both carriers are supplied by the host application
//! through the traits in [`carriers`].

pub mod carriers;
pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use carriers::*;
pub use domain::*;
pub use errors::*;
pub use services::{Clock, FixedClock, SystemClock, TokenAuthenticator, TokenServiceConfig};

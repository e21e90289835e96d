//! Token service module
//!
//! This module handles all token-related operations including:
//! - Signing claims into HS256 tokens and verifying them
//! - Expiration arithmetic against an injectable clock
//! - Mirroring claims into the session carrier
//! - Writing and clearing the cookie carrier

mod clock;
mod config;
mod service;


pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenAuthenticator;

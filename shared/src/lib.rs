//! Shared configuration and telemetry for the session auth workspace
//!
//! This crate provides functionality used by every other crate:
//! - Configuration types (signing secret, default validity, cookie attributes)
//! - Environment detection and logging configuration
//! - Tracing subscriber initialisation

pub mod config;
pub mod telemetry;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CookieConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, SameSite,
};
pub use telemetry::init_tracing;

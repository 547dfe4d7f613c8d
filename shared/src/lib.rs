//! Shared utilities and common types for the RT Management server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    JwtConfig, RevocationConfig, AuthConfig,
    ServerConfig, LoggingConfig,
};
pub use errors::{ErrorResponse, error_codes};

//! # RT Management Core
//!
//! Session-token authority for the RT Management backend: claims, token
//! issuance, validation and revocation, plus the error types shared with the
//! API layer.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, RevocationEntry};
pub use errors::{AuthError, DomainError, TokenError};
pub use services::token::{
    ClaimsCodec, RevocationStore, RevocationSweeper, TokenIssuer, TokenService,
    TokenServiceConfig, TokenValidator,
};

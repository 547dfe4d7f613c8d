//! Token service module for session management
//!
//! This module handles all token-related operations including:
//! - Claims encoding, signing and verification
//! - Token issuance with a fixed lifetime
//! - Token revocation with self-expiring entries
//! - Validation in a fixed check order
//! - Background sweep of expired revocations

mod cleanup;
mod codec;
mod config;
mod issuer;
mod revocation;
mod service;
mod validator;


pub use cleanup::{RevocationSweeper, SweepConfig, SweepResult};
pub use codec::ClaimsCodec;
pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use revocation::RevocationStore;
pub use service::TokenService;
pub use validator::TokenValidator;

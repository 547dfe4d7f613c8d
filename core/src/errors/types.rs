//! Domain-specific error types for session authentication
//!
//! Messages are bilingual (English | Indonesian), matching the languages the
//! API answers in.

use rt_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Session-token errors.
///
/// Each validation failure is a distinct variant so callers can tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token | Format token tidak valid")]
    MalformedToken,

    #[error("Token signature verification failed | Verifikasi tanda tangan token gagal")]
    SignatureInvalid,

    #[error("Token expired | Token telah kedaluwarsa")]
    Expired,

    #[error("Token revoked | Token telah dicabut")]
    Revoked,

    #[error("Signing key unavailable | Kunci penandatanganan tidak tersedia")]
    SigningKey,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => error_codes::TOKEN_MALFORMED,
            TokenError::SignatureInvalid => error_codes::TOKEN_SIGNATURE_INVALID,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::Revoked => error_codes::TOKEN_REVOKED,
            TokenError::SigningKey => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Request authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header required | Header Authorization diperlukan")]
    MissingCredentials,

    #[error("Invalid authorization format | Format otorisasi tidak valid")]
    InvalidAuthorizationFormat,

    #[error("Insufficient permissions | Izin tidak mencukupi")]
    InsufficientPermissions,
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => error_codes::MISSING_CREDENTIALS,
            AuthError::InvalidAuthorizationFormat => error_codes::INVALID_AUTHORIZATION_FORMAT,
            AuthError::InsufficientPermissions => error_codes::INSUFFICIENT_PERMISSIONS,
        }
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

/// Helper function to extract English message from bilingual error
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract Indonesian message from bilingual error
pub fn extract_indonesian_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}

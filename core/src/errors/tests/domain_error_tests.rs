//! Unit tests for domain error types

use rt_shared::errors::ErrorResponse;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::errors::{extract_english_message, extract_indonesian_message};

#[test]
fn test_token_error_messages_are_bilingual() {
    let message = TokenError::Expired.to_string();
    assert!(message.contains("Token expired"));
    assert!(message.contains("Token telah kedaluwarsa"));
}

#[test]
fn test_token_error_conversion() {
    let response: ErrorResponse = TokenError::Revoked.into();
    assert_eq!(response.error, "TOKEN_REVOKED");
    assert!(response.message.contains("Token revoked"));
    assert!(response.message.contains("Token telah dicabut"));
}

#[test]
fn test_token_error_codes_are_distinct() {
    let codes = [
        TokenError::MalformedToken.code(),
        TokenError::SignatureInvalid.code(),
        TokenError::Expired.code(),
        TokenError::Revoked.code(),
        TokenError::SigningKey.code(),
    ];

    for (i, a) in codes.iter().enumerate() {
        for b in codes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_auth_error_conversion() {
    let response: ErrorResponse = AuthError::InsufficientPermissions.into();
    assert_eq!(response.error, "INSUFFICIENT_PERMISSIONS");
    assert_eq!(
        extract_english_message(&response.message),
        "Insufficient permissions"
    );
}

#[test]
fn test_domain_error_bridges() {
    let error: DomainError = TokenError::SignatureInvalid.into();
    assert!(matches!(error, DomainError::Token(TokenError::SignatureInvalid)));

    let error: DomainError = AuthError::MissingCredentials.into();
    assert_eq!(
        error.to_string(),
        "Authorization header required | Header Authorization diperlukan"
    );
}

#[test]
fn test_extract_messages() {
    let message = "Token expired | Token telah kedaluwarsa";
    assert_eq!(extract_english_message(message), "Token expired");
    assert_eq!(extract_indonesian_message(message), "Token telah kedaluwarsa");

    let plain = "no separator";
    assert_eq!(extract_english_message(plain), plain);
    assert_eq!(extract_indonesian_message(plain), plain);
}

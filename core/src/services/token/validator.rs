//! Token validation pipeline

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::codec::ClaimsCodec;
use super::revocation::RevocationStore;

/// Validates bearer tokens presented on authenticated requests.
///
/// Checks run in a fixed order: revocation, then structure and signature, then
/// expiry. A token still held by the revocation list reports
/// [`TokenError::Revoked`] even if its signature would also fail. Revocations
/// lapse together with the token's own `exp`, after which the token reports
/// [`TokenError::Expired`].
pub struct TokenValidator {
    codec: Arc<ClaimsCodec>,
    revocations: Arc<RevocationStore>,
}

impl TokenValidator {
    pub fn new(codec: Arc<ClaimsCodec>, revocations: Arc<RevocationStore>) -> Self {
        Self { codec, revocations }
    }

    /// Returns the token's claims, or the first failed check
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if self.revocations.is_revoked(token) {
            return Err(TokenError::Revoked);
        }

        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(Utc::now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

//! Token issuance

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::codec::ClaimsCodec;

/// Builds claims for a subject and signs them
pub struct TokenIssuer {
    codec: Arc<ClaimsCodec>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: Arc<ClaimsCodec>, ttl: Duration) -> Self {
        Self { codec, ttl }
    }

    /// Issues a token for `(subject_id, username, role_id)` valid from now for the TTL
    pub fn issue(&self, subject_id: u64, username: &str, role_id: u64) -> Result<String, TokenError> {
        let claims = Claims::new(subject_id, username, role_id, Utc::now(), self.ttl)?;
        let token = self.codec.encode(&claims)?;

        debug!(
            subject_id,
            role_id,
            issued_at = %claims.issued_at(),
            expires_at = %claims.expires_at(),
            "issued session token"
        );
        Ok(token)
    }

    /// Issues a fresh token for the identity carried by existing claims
    pub fn reissue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.issue(claims.subject_id, &claims.username, claims.role_id)
    }
}

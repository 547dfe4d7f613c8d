//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Default session lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Longest session lifetime accepted from configuration (one year)
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Claims structure for the JWT payload.
///
/// Wire names follow the existing clients: `user_id`, `username`, `level_id`,
/// `iat` and `exp` (unix seconds). `jti` keeps two tokens issued for the same
/// user within one second distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(rename = "user_id")]
    pub subject_id: u64,

    /// Display name of the subject
    pub username: String,

    /// Role (level) of the subject
    #[serde(rename = "level_id")]
    pub role_id: u64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims issued at `now` that expire after `ttl`.
    ///
    /// Fails with [`TokenError::SigningKey`] when `now + ttl` is not a
    /// representable instant.
    pub fn new(
        subject_id: u64,
        username: impl Into<String>,
        role_id: u64,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now.checked_add_signed(ttl).ok_or(TokenError::SigningKey)?;

        Ok(Self {
            subject_id,
            username: username.into(),
            role_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Issuance instant
    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    /// Expiry instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// A token is expired once `now` is strictly past its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}

/// An entry in the revocation list.
///
/// `expires_at` always mirrors the `exp` claim of the revoked token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationEntry {
    /// SHA-256 hex digest of the revoked token
    pub token_hash: String,

    /// Natural expiry of the revoked token
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self { token_hash, expires_at }
    }

    /// An entry is reclaimable once its token could no longer pass the expiry
    /// check, i.e. under the same comparison as [`Claims::is_expired_at`].
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Out-of-range timestamps map to the minimum representable instant.
fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

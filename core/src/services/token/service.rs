//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::codec::ClaimsCodec;
use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::revocation::RevocationStore;
use super::validator::TokenValidator;

/// Session-token authority: issues, validates and revokes bearer tokens.
///
/// Construct once at service start and share it behind an `Arc`; the
/// revocation list lives inside and is discarded with the service.
pub struct TokenService {
    config: TokenServiceConfig,
    issuer: TokenIssuer,
    validator: TokenValidator,
    revocations: Arc<RevocationStore>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error if the secret is empty or the token
    /// lifetime is not positive
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Token(TokenError::SigningKey));
        }
        if config.token_ttl <= Duration::zero() {
            return Err(DomainError::Internal {
                message: format!("Token lifetime must be positive, got {}", config.token_ttl),
            });
        }
        Ok(Self::build(config))
    }

    /// Creates a token service even when no secret is configured.
    ///
    /// Issuance then fails with [`TokenError::SigningKey`] and every token is
    /// rejected.
    pub fn without_key_check(config: TokenServiceConfig) -> Self {
        Self::build(config)
    }

    fn build(config: TokenServiceConfig) -> Self {
        let codec = Arc::new(ClaimsCodec::with_algorithm(&config.jwt_secret, config.algorithm));
        let revocations = Arc::new(if config.schedule_per_entry_cleanup {
            RevocationStore::new(Arc::clone(&codec))
        } else {
            RevocationStore::without_scheduled_cleanup(Arc::clone(&codec))
        });

        Self {
            issuer: TokenIssuer::new(Arc::clone(&codec), config.token_ttl),
            validator: TokenValidator::new(codec, Arc::clone(&revocations)),
            revocations,
            config,
        }
    }

    /// Lifetime of newly issued tokens
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl
    }

    /// Issues a token for a logged-in user
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The user's ID
    /// * `username` - The user's display name
    /// * `role_id` - The user's level
    pub fn issue(&self, subject_id: u64, username: &str, role_id: u64) -> Result<String, TokenError> {
        self.issuer.issue(subject_id, username, role_id)
    }

    /// Validates a bearer token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Revoked, malformed, tampered or expired
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validator.validate(token)
    }

    /// Revokes a token until its natural expiry
    pub fn revoke(&self, token: &str) -> Result<(), TokenError> {
        self.revocations.revoke(token)
    }

    /// Whether the token is currently revoked
    pub fn is_revoked(&self, token: &str) -> bool {
        self.revocations.is_revoked(token)
    }

    /// Exchanges a valid token for a new one and revokes the old one
    ///
    /// # Arguments
    ///
    /// * `current_token` - The caller's current session token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new token
    /// * `Err(TokenError)` - The current token is not valid, or signing failed
    pub fn refresh(&self, current_token: &str) -> Result<String, TokenError> {
        let claims = self.validator.validate(current_token)?;
        let token = self.issuer.reissue(&claims)?;

        if let Err(e) = self.revocations.revoke(current_token) {
            warn!(subject_id = claims.subject_id, error = %e, "failed to revoke refreshed token");
        }
        debug!(subject_id = claims.subject_id, "session token refreshed");

        Ok(token)
    }

    /// Removes expired revocations, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.revocations.purge_expired()
    }

    /// Number of revocations currently held
    pub fn revoked_count(&self) -> usize {
        self.revocations.size()
    }

    /// Shared handle to the revocation list
    pub fn revocation_store(&self) -> Arc<RevocationStore> {
        Arc::clone(&self.revocations)
    }
}

//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use rt_shared::config::{AuthConfig, DEFAULT_JWT_SECRET};

use crate::domain::entities::token::{DEFAULT_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_DAYS};
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
    /// Spawn one cleanup task per revoked token
    pub schedule_per_entry_cleanup: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            schedule_per_entry_cleanup: true,
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with the given secret and default lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Override the token lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Build from the application's auth configuration
    pub fn from_auth_config(auth: &AuthConfig) -> Result<Self, DomainError> {
        let algorithm = parse_hmac_algorithm(&auth.jwt.algorithm)?;

        Ok(Self {
            jwt_secret: auth.jwt.secret.clone(),
            algorithm,
            token_ttl: parse_ttl_seconds(auth.jwt.access_token_expiry)?,
            schedule_per_entry_cleanup: auth.revocation.schedule_per_entry_cleanup,
        })
    }
}

fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, DomainError> {
    match name.parse::<Algorithm>() {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(DomainError::Internal {
            message: format!("Unsupported JWT algorithm: {}", name),
        }),
    }
}

fn parse_ttl_seconds(seconds: i64) -> Result<Duration, DomainError> {
    if seconds <= 0 || seconds > MAX_TOKEN_TTL_DAYS * 24 * 3600 {
        return Err(DomainError::Internal {
            message: format!(
                "JWT access token expiry must be between 1 and {} days in seconds, got {}",
                MAX_TOKEN_TTL_DAYS, seconds
            ),
        });
    }
    Ok(Duration::seconds(seconds))
}

//! Authentication and session-token configuration

use serde::{Deserialize, Serialize};

/// Built-in development secret, used when `JWT_SECRET` is unset
pub const DEFAULT_JWT_SECRET: &str = "rt-management-secret-key-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 86400, // 24 hours
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Revocation list maintenance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Interval between full sweeps of expired revocations, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Whether the periodic sweep runs at all
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,

    /// Schedule one cleanup task per revoked token at its expiry
    #[serde(default = "default_true")]
    pub schedule_per_entry_cleanup: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: default_sweep_interval(),
            sweep_enabled: true,
            schedule_per_entry_cleanup: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation list configuration
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);
        let sweep_interval_seconds = std::env::var("REVOCATION_SWEEP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_sweep_interval);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                algorithm: default_algorithm(),
            },
            revocation: RevocationConfig {
                sweep_interval_seconds,
                ..Default::default()
            },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

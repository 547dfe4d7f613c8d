//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Session token signing and revocation configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, RevocationConfig, DEFAULT_JWT_SECRET};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load layered configuration.
    ///
    /// Values from [`AppConfig::from_env`] form the base layer, overridden by the
    /// optional per-environment TOML file, then by `RT__`-prefixed variables
    /// (e.g. `RT__AUTH__JWT__ACCESS_TOKEN_EXPIRY=3600`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let base = Self::from_env();
        let config_file = base.environment.config_file().to_string();

        config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(
                config::Environment::with_prefix("RT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_development_logging() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.auth.jwt.access_token_expiry, 86400);
    }

    #[test]
    fn test_app_config_round_trips_through_config_builder() {
        let base = AppConfig::default();
        let loaded: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&base).unwrap())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(loaded.server.port, base.server.port);
        assert_eq!(loaded.auth.jwt.secret, base.auth.jwt.secret);
        assert_eq!(loaded.auth.revocation.sweep_interval_seconds, 60);
    }
}

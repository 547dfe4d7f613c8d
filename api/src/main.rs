use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rt_api::app::create_app;
use rt_api::routes::auth::AppState;
use rt_core::services::token::SweepConfig;
use rt_core::{RevocationSweeper, TokenService, TokenServiceConfig};
use rt_shared::config::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Falling back to environment configuration: {}", e);
            AppConfig::from_env()
        }
    };

    init_tracing(&config.logging);
    info!("Starting RT Management API ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the built-in development secret");
    }

    let token_config = TokenServiceConfig::from_auth_config(&config.auth)
        .context("invalid token configuration")?;
    let token_service = Arc::new(TokenService::new(token_config).context("cannot create token service")?);
    info!(ttl_seconds = token_service.token_ttl().num_seconds(), "token service ready");

    let sweeper = Arc::new(RevocationSweeper::new(
        token_service.revocation_store(),
        SweepConfig::from(&config.auth.revocation),
    ));
    sweeper.start_background_task();

    let app_state = web::Data::new(
        AppState::new(Arc::clone(&token_service)).with_cors(config.cors.clone()),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("cannot bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored);

    match logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

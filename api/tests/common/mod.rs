//! Shared fixtures for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;
use rt_api::routes::auth::AppState;
use rt_core::{TokenService, TokenServiceConfig};

pub const TEST_SECRET: &str = "api-test-secret";

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET)).unwrap())
}

pub fn short_lived_token_service(ttl: Duration) -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET).with_ttl(ttl)).unwrap())
}

pub fn app_state(token_service: &Arc<TokenService>) -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::clone(token_service)))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

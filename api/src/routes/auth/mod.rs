//! Authentication route handlers
//!
//! - Logout (revokes the caller's token)
//! - Token refresh
//! - Profile of the authenticated caller

pub mod logout;
pub mod profile;
pub mod refresh;

use std::sync::Arc;

use rt_core::TokenService;
use rt_shared::config::CorsConfig;

/// Application state shared by all handlers
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service,
            cors: CorsConfig::default(),
        }
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }
}

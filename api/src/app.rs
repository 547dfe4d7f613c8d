//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use rt_shared::errors::error_codes;
use serde_json::json;
use tracing_actix_web::TracingLogger;

use crate::middleware::{
    auth::{JwtAuth, OptionalAuth},
    cors::create_cors,
    role::{RequireLevel, ADMIN_LEVEL},
};
use crate::routes::admin::{purge_revocations, revocation_stats};
use crate::routes::auth::{logout::logout, profile::profile, refresh::refresh, AppState};

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&app_state.cors);
    let auth = JwtAuth::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        // Registration order is innermost first: auth runs after CORS and logging
        .wrap(auth)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/api/docs", web::get().to(api_documentation))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/logout", web::post().to(logout))
                        .route("/refresh", web::post().to(refresh))
                        .route("/profile", web::get().to(profile)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RequireLevel::new([ADMIN_LEVEL]))
                        .route("/revocations", web::get().to(revocation_stats))
                        .route("/revocations/purge", web::post().to(purge_revocations)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "rt-management-api",
        "version": env!("CARGO_PKG_VERSION"),
        "revoked_tokens": state.token_service.revoked_count(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation(auth: OptionalAuth) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "RT Management API v1",
        "authenticated_as": auth.0.map(|ctx| ctx.username),
        "endpoints": {
            "health": "/health",
            "auth": {
                "logout": {
                    "path": "/api/v1/auth/logout",
                    "method": "POST",
                    "requires_auth": true,
                    "description": "Revoke the current session token",
                },
                "refresh": {
                    "path": "/api/v1/auth/refresh",
                    "method": "POST",
                    "requires_auth": true,
                    "description": "Exchange the current token for a new one",
                },
                "profile": {
                    "path": "/api/v1/auth/profile",
                    "method": "GET",
                    "requires_auth": true,
                    "description": "Identity carried by the current token",
                },
            },
            "admin": {
                "revocations": {
                    "path": "/api/v1/admin/revocations",
                    "method": "GET",
                    "required_level": ADMIN_LEVEL,
                },
                "purge": {
                    "path": "/api/v1/admin/revocations/purge",
                    "method": "POST",
                    "required_level": ADMIN_LEVEL,
                },
            },
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": error_codes::NOT_FOUND,
        "message": "The requested resource was not found"
    }))
}

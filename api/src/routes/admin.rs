//! Revocation list maintenance, restricted to administrators

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::routes::auth::AppState;

/// Handler for GET /api/v1/admin/revocations
pub async fn revocation_stats(state: web::Data<AppState>) -> HttpResponse {
    let entries = state.token_service.revocation_store().entries();
    let next_expiry = entries.iter().map(|e| e.expires_at).min();

    HttpResponse::Ok().json(json!({
        "revoked_tokens": entries.len(),
        "next_expiry": next_expiry.map(|t| t.to_rfc3339()),
    }))
}

/// Handler for POST /api/v1/admin/revocations/purge
///
/// Runs an expiry sweep immediately instead of waiting for the background one.
pub async fn purge_revocations(state: web::Data<AppState>) -> HttpResponse {
    let purged = state.token_service.purge_expired();
    let remaining = state.token_service.revoked_count();
    info!(purged, remaining, "manual revocation purge");

    HttpResponse::Ok().json(json!({
        "purged": purged,
        "remaining": remaining,
    }))
}

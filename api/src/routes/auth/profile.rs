use actix_web::HttpResponse;

use crate::dto::auth::ProfileResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/profile
///
/// Returns the identity carried by the caller's token.
pub async fn profile(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ProfileResponse {
        user_id: auth.user_id,
        username: auth.username,
        level_id: auth.level_id,
    })
}

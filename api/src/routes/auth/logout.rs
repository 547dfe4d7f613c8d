use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::Language;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token the request was authenticated with. Requires
/// authentication via [`JwtAuth`](crate::middleware::auth::JwtAuth).
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logout successful"
/// }
/// ```
///
/// A failed revocation is logged and still answered with 200.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid token
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
) -> HttpResponse {
    let lang = Language::from_request(&req);

    match state.token_service.revoke(&auth.token) {
        Ok(()) => info!(user_id = auth.user_id, "user logged out"),
        Err(e) => warn!(user_id = auth.user_id, error = %e, "logout could not revoke token"),
    }

    let message = match lang {
        Language::English => "Logout successful",
        Language::Indonesian => "Logout berhasil",
    };

    HttpResponse::Ok().json(LogoutResponse {
        message: message.to_string(),
    })
}

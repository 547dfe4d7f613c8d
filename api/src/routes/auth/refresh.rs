use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::dto::auth::RefreshResponse;
use crate::handlers::error::{ApiError, Language};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the caller's token for a new one carrying the same identity. The
/// old token is revoked.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "message": "Token refreshed successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or revoked token
/// - 500 Internal Server Error: Token generation failure
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
) -> HttpResponse {
    let lang = Language::from_request(&req);

    match state.token_service.refresh(&auth.token) {
        Ok(token) => {
            let message = match lang {
                Language::English => "Token refreshed successfully",
                Language::Indonesian => "Token berhasil diperbarui",
            };
            HttpResponse::Ok().json(RefreshResponse {
                token,
                message: message.to_string(),
            })
        }
        Err(error) => ApiError::from_token_error(&error, lang).error_response(),
    }
}

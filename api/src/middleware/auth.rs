//! Bearer-token authentication middleware for protecting API endpoints.
//!
//! The middleware reads `Authorization: Bearer <token>`, runs it through the
//! [`TokenService`] validation pipeline and injects an [`AuthContext`] into the
//! request. Rejections are answered with a JSON 401 without revealing why the
//! token was refused.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use rt_core::{errors::AuthError, Claims, TokenService};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::{debug, warn};

use crate::handlers::error::{ApiError, Language};
use crate::routes::auth::AppState;

/// Paths reachable without a token
pub const PUBLIC_PATHS: &[&str] = &["/health", "/api/docs"];

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: u64,
    pub username: String,
    pub level_id: u64,
    /// The bearer token the request was authenticated with
    pub token: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims, token: String) -> Self {
        Self {
            user_id: claims.subject_id,
            username: claims.username,
            level_id: claims.role_id,
            token,
        }
    }
}

/// Bearer authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.contains(&req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) });
        }

        let lang = Language::from_request(req.request());
        match authenticate(req.headers(), &self.token_service, lang) {
            Ok(context) => {
                debug!(
                    user_id = context.user_id,
                    level_id = context.level_id,
                    path = %req.path(),
                    "request authenticated"
                );
                req.extensions_mut().insert(context);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(error) => {
                warn!(path = %req.path(), reason = %error, "authentication failed");
                let response = error.error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

fn authenticate(
    headers: &HeaderMap,
    token_service: &TokenService,
    lang: Language,
) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(headers).map_err(|e| ApiError::from_auth_error(&e, lang))?;

    match token_service.validate(&token) {
        Ok(claims) => Ok(AuthContext::from_claims(claims, token)),
        Err(e) => {
            debug!(error = ?e, "token rejected");
            Err(ApiError::from_token_error(&e, lang))
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingCredentials),
    };
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token.to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            ApiError::from_auth_error(&AuthError::MissingCredentials, Language::from_request(req))
        });

        ready(result)
    }
}

/// Extractor for optional authentication.
///
/// Uses the context set by [`JwtAuth`] when present, otherwise validates a
/// bearer token itself. Never fails.
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(context) = req.extensions().get::<AuthContext>().cloned() {
            return ready(Ok(OptionalAuth(Some(context))));
        }

        let context = req.app_data::<web::Data<AppState>>().and_then(|state| {
            let token = extract_bearer_token(req.headers()).ok()?;
            let claims = state.token_service.validate(&token).ok()?;
            Some(AuthContext::from_claims(claims, token))
        });

        ready(Ok(OptionalAuth(context)))
    }
}

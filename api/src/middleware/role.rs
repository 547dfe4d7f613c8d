//! Level-based authorization, applied after [`JwtAuth`](super::auth::JwtAuth).

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use rt_core::errors::AuthError;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::warn;

use super::auth::AuthContext;
use crate::handlers::error::{ApiError, Language};

/// Level of RT administrators
pub const ADMIN_LEVEL: u64 = 1;

/// Level of RT staff (secretary, treasurer)
pub const STAFF_LEVEL: u64 = 2;

/// Admits only callers whose level is in the allowed set
pub struct RequireLevel {
    allowed_levels: Rc<Vec<u64>>,
}

impl RequireLevel {
    pub fn new(allowed_levels: impl IntoIterator<Item = u64>) -> Self {
        Self {
            allowed_levels: Rc::new(allowed_levels.into_iter().collect()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireLevel
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLevelMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLevelMiddleware {
            service: Rc::new(service),
            allowed_levels: Rc::clone(&self.allowed_levels),
        }))
    }
}

pub struct RequireLevelMiddleware<S> {
    service: Rc<S>,
    allowed_levels: Rc<Vec<u64>>,
}

impl<S, B> Service<ServiceRequest> for RequireLevelMiddleware<S>
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
        let lang = Language::from_request(req.request());
        let context = req.extensions().get::<AuthContext>().cloned();

        let denied = match context {
            None => Some(AuthError::MissingCredentials),
            Some(ctx) if !self.allowed_levels.contains(&ctx.level_id) => {
                warn!(
                    username = %ctx.username,
                    level_id = ctx.level_id,
                    required = ?self.allowed_levels,
                    path = %req.path(),
                    "access denied"
                );
                Some(AuthError::InsufficientPermissions)
            }
            Some(_) => None,
        };

        match denied {
            None => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Some(error) => {
                let response = ApiError::from_auth_error(&error, lang).error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

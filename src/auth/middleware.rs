use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Bearer-token gate for protected scopes.
///
/// Wrapped around the `/tasks` scope; registration and login are mounted
/// outside it. A request passes through exactly one of three states:
/// - no `Authorization: Bearer <token>` header → 401, processing halts;
/// - token present but rejected by [`TokenService::verify`] → 403, halts;
/// - token verified → the decoded [`Claims`] are inserted into request
///   extensions and downstream handlers trust them for the rest of the
///   request. This is the only gate protecting task ownership.
///
/// [`Claims`]: crate::auth::token::Claims
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        let Some(token) = bearer else {
            let err = AppError::Unauthorized("missing credential".into());
            return Box::pin(async move { Err(err.into()) });
        };

        let verified = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => tokens.verify(&token),
            None => {
                let err = AppError::Internal("token service not configured".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        match verified {
            Some(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            None => {
                let err = AppError::Forbidden("invalid credential".into());
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}

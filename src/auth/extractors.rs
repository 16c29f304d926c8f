use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated identity from request extensions.
///
/// Intended for routes protected by `AuthMiddleware`, which validates the
/// bearer token and inserts the decoded [`Claims`] into request extensions.
/// Handlers take a `CurrentUser` argument and may rely on it being present
/// and well-formed for the lifetime of the request.
///
/// If no identity is attached (middleware not applied, or an internal logic
/// error after auth), extraction fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(CurrentUser {
                id: claims.sub,
                email: claims.email.clone(),
            })),
            None => {
                let err = AppError::Unauthorized(
                    "no authenticated identity attached to request".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

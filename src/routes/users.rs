use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, TokenService},
    error::AppError,
    services::users::{self, LoginOutcome, RegisterOutcome},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns a freshly issued identity token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let outcome = users::register(
        &pool,
        &tokens,
        &register_data.name,
        &register_data.email,
        &register_data.password,
    )
    .await?;

    match outcome {
        RegisterOutcome::Created { token } => {
            Ok(HttpResponse::Created().json(AuthResponse { token }))
        }
        RegisterOutcome::EmailTaken => Err(AppError::Conflict("email already in use".into())),
        RegisterOutcome::Failed => Err(AppError::BadRequest("could not register user".into())),
    }
}

/// Login user
///
/// Authenticates a user and returns a freshly issued identity token. Unknown
/// accounts and wrong passwords answer with the same 401 body.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let outcome = users::login(&pool, &tokens, &login_data.email, &login_data.password).await?;

    match outcome {
        LoginOutcome::Authenticated { token } => Ok(HttpResponse::Ok().json(AuthResponse { token })),
        LoginOutcome::InvalidCredentials => {
            Err(AppError::Unauthorized("invalid credentials".into()))
        }
    }
}

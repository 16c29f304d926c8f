//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It implements `actix_web::error::ResponseError` so handlers
//! and middleware can return errors that convert straight into JSON HTTP
//! responses.
//!
//! Errors come in two flavours that must not be conflated:
//! - client-attributable outcomes (`BadRequest`, `Unauthorized`, `Forbidden`,
//!   `Conflict`) carry a message that is safe to show the caller;
//! - infrastructure faults (`Database`, `Internal`) keep their detail in the
//!   server log and answer the client with a generic 500 body.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all failure modes surfaced over HTTP by the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid request input (HTTP 400).
    BadRequest(String),
    /// No credential supplied, or a login attempt was rejected (HTTP 401).
    Unauthorized(String),
    /// A credential was present but rejected, or a resource is not owned by
    /// the requester (HTTP 403).
    Forbidden(String),
    /// A uniqueness constraint was violated, e.g. a duplicate email (HTTP 409).
    Conflict(String),
    /// A store operation failed unexpectedly (HTTP 500). Carries the verb
    /// that failed ("fetching tasks", ...) for logs; the client only sees a
    /// generic message.
    Database(&'static str),
    /// Any other unexpected server-side fault (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Database(op) => write!(f, "Database Error while {}", op),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            // Infrastructure faults never leak internal error text; the
            // operation context was already logged where the fault occurred.
            AppError::Database(_) | AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal server error"
                }))
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
///
/// Field-level validation failures are client mistakes, reported as 400.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::Unauthorized("Missing credential".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden("Invalid credential".into());
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::Conflict("Email already in use".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::Database("fetching tasks");
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::Internal("boom".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_faults_do_not_leak_detail() {
        let error = AppError::Database("creating task");
        let response = error.error_response();
        assert_eq!(response.status(), 500);
        // Display keeps the operation context for the log line.
        assert_eq!(error.to_string(), "Database Error while creating task");
    }
}

use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness probe. Mounted outside the authenticated scopes.
///
/// ## Responses:
/// - `200 OK`: `{service, status, timestamp}` with the current server time.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "tasklist",
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

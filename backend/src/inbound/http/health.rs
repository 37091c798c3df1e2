//! Liveness endpoint shared by every service role.

use actix_web::{HttpResponse, get, http::header};

/// Report that the process is serving requests. No dependencies are checked.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}

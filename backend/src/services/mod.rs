pub mod overview;
pub mod reports;
pub mod uploads;

use actix_web::error::InternalError;
use actix_web::http::header::{HeaderName, CONTENT_DISPOSITION};
use actix_web::web::{self, get, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::responses::{ErrorResponse, HealthResponse};

/// JSON body config whose rejections use the same `{"success", "detail"}` body
/// as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// `Content-Disposition: attachment; filename=<name>`, unquoted as the upload
/// page parses it.
pub(crate) fn attachment(filename: &str) -> (HeaderName, String) {
    (CONTENT_DISPOSITION, format!("attachment; filename={}", filename))
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        message: "Spielbericht Generator API is running",
    })
}

/// `GET /api/health`
pub fn configure_routes() -> Scope {
    scope("/api/health").route("", get().to(health))
}

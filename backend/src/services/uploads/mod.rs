//! Upload endpoints.
//!
//! - `POST /api/upload`: multipart form with the schedule (`spielplan`), an
//!   optional roster (`players`) and an optional template (`template`). All
//!   three must be `.xlsx`. A successful upload replaces the current session.
//! - `GET /api/matches`: the matches of the current upload.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod matches;
mod upload;

const API_PATH: &str = "/api";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/matches", get().to(matches::process))
}

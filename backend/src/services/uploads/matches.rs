use crate::session::state::SessionState;
use actix_web::{web, HttpResponse, Responder};
use common::responses::MatchesResponse;

/// Lists the matches of the current upload.
///
/// Answers `200 OK` either way; without an upload the body carries
/// `success: false` and a hint to upload first.
pub(crate) async fn process(state: web::Data<SessionState>) -> impl Responder {
    let response = match state.current().await {
        Some(session) => MatchesResponse {
            success: true,
            count: session.matches.len(),
            matches: session.matches.clone(),
            message: None,
        },
        None => MatchesResponse {
            success: false,
            matches: Vec::new(),
            count: 0,
            message: Some("No matches loaded. Please upload files first.".to_string()),
        },
    };
    HttpResponse::Ok().json(response)
}

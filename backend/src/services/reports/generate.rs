use super::batch::{GeneratedPdf, ReportGenerator};
use super::ReportTools;
use crate::error::GenerateError;
use crate::session::state::SessionState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::GenerateRequest;
use common::responses::ErrorResponse;

/// Header listing requested ids that were not part of the upload.
const SKIPPED_HEADER: &str = "X-Skipped-Matches";

/// The Actix web handler for `POST /api/generate`.
///
/// # Returns
/// - `200 OK` with the PDF as an attachment.
/// - `400 Bad Request` if nothing was uploaded or the ids are unusable.
/// - `409 Conflict` if the request names an upload that has been replaced.
/// - `500 Internal Server Error` if filling, converting or merging failed.
pub(crate) async fn process(
    state: web::Data<SessionState>,
    tools: web::Data<ReportTools>,
    payload: web::Json<GenerateRequest>,
) -> impl Responder {
    match generate(&state, &tools, payload.into_inner()).await {
        Ok(pdf) => {
            let mut response = HttpResponse::Ok();
            response
                .content_type("application/pdf")
                .insert_header(crate::services::attachment(&pdf.filename));
            if !pdf.skipped.is_empty() {
                let skipped: Vec<String> = pdf.skipped.iter().map(usize::to_string).collect();
                response.insert_header((SKIPPED_HEADER, skipped.join(",")));
            }
            response.body(pdf.bytes)
        }
        Err(err) => error_response(&err),
    }
}

async fn generate(
    state: &SessionState,
    tools: &ReportTools,
    req: GenerateRequest,
) -> Result<GeneratedPdf, GenerateError> {
    let session = state.current_for(req.session_id()).await?;
    let ids = req.match_ids().to_vec();
    log::info!(
        "Generating {} report(s) for upload {}",
        ids.len(),
        session.id
    );

    let tools = tools.clone();
    let pdf = tokio::task::spawn_blocking(move || {
        ReportGenerator::new(
            &session,
            tools.converter.as_ref(),
            tools.merger.as_ref(),
            &tools.work_dir,
        )
        .generate(&ids)
    })
    .await
    .map_err(|e| GenerateError::Task(e.to_string()))??;

    log::info!(
        "Generated {} for matches {:?}, skipped {:?}",
        pdf.filename,
        pdf.match_ids,
        pdf.skipped
    );
    if !pdf.cell_errors.is_empty() {
        log::warn!(
            "{} placeholder cell(s) could not be filled",
            pdf.cell_errors.len()
        );
    }
    Ok(pdf)
}

fn error_response(err: &GenerateError) -> HttpResponse {
    let body = ErrorResponse::new(err.to_string());
    match err {
        GenerateError::StaleSession { .. } => HttpResponse::Conflict().json(body),
        err if err.is_client_error() => HttpResponse::BadRequest().json(body),
        err => {
            log::error!("Report generation failed: {:?}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

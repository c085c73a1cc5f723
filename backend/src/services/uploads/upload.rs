use crate::config::Config;
use crate::error::{InputError, TemplateError};
use crate::ingest::{ensure_xlsx, players::read_roster, schedule::read_schedule};
use crate::report::Template;
use crate::session::state::{Session, SessionState};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use common::model::roster::Roster;
use common::model::schedule::MatchRecord;
use common::responses::{ErrorResponse, UploadResponse};
use futures_util::StreamExt;
use std::sync::Arc;
use thiserror::Error;

const SCHEDULE_FIELD: &str = "spielplan";
const ROSTER_FIELD: &str = "players";
const TEMPLATE_FIELD: &str = "template";

#[derive(Debug, Error)]
enum UploadError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("template: {0}")]
    Template(#[from] TemplateError),
    #[error("no Spielbericht template configured; upload one with the schedule")]
    NoTemplate,
    #[error("upload processing failed: {0}")]
    Task(String),
}

struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

/// The Actix web handler for `POST /api/upload`.
///
/// - On success: `200 OK` with the parsed matches and the new session id.
/// - On bad input: `400 Bad Request` with `{"success": false, "detail": ...}`.
pub(crate) async fn process(
    state: web::Data<SessionState>,
    config: web::Data<Config>,
    payload: Multipart,
) -> impl Responder {
    match upload_files(&state, config.max_upload_bytes, payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(UploadError::Task(e)) => {
            log::error!("Upload processing failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e))
        }
        Err(e) => {
            log::warn!("Upload rejected: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}

async fn upload_files(
    state: &SessionState,
    limit: usize,
    mut payload: Multipart,
) -> Result<UploadResponse, UploadError> {
    let mut schedule: Option<UploadedFile> = None;
    let mut roster: Option<UploadedFile> = None;
    let mut template: Option<UploadedFile> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| InputError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        let slot = match name.as_deref() {
            Some(SCHEDULE_FIELD) => &mut schedule,
            Some(ROSTER_FIELD) => &mut roster,
            Some(TEMPLATE_FIELD) => &mut template,
            // Unknown fields are drained and ignored.
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| InputError::Multipart(e.to_string()))?;
                }
                continue;
            }
        };
        *slot = Some(read_file(&mut field, name.as_deref().unwrap_or_default(), limit).await?);
    }

    let schedule = schedule.ok_or(InputError::MissingField(SCHEDULE_FIELD))?;
    let parsed = tokio::task::spawn_blocking(move || parse_upload(schedule, roster, template))
        .await
        .map_err(|e| UploadError::Task(e.to_string()))??;
    let (matches, roster, uploaded_template) = parsed;

    let template = match uploaded_template {
        Some(template) => Arc::new(template),
        None => state.default_template().await.ok_or(UploadError::NoTemplate)?,
    };

    let count = matches.len();
    let teams = roster.team_count();
    let session_id = state
        .replace(Session::new(matches.clone(), roster, template))
        .await;
    log::info!(
        "Upload {} loaded {} matches and {} roster teams",
        session_id,
        count,
        teams
    );

    Ok(UploadResponse {
        success: true,
        session_id,
        matches,
        count,
        message: format!("Successfully loaded {} matches", count),
    })
}

async fn read_file(
    field: &mut Field,
    name: &str,
    limit: usize,
) -> Result<UploadedFile, InputError> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
        .unwrap_or_default();
    ensure_xlsx(name, &filename)?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| InputError::Multipart(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(InputError::TooLarge {
                field: name.to_string(),
                limit,
            });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(UploadedFile { filename, bytes })
}

fn parse_upload(
    schedule: UploadedFile,
    roster: Option<UploadedFile>,
    template: Option<UploadedFile>,
) -> Result<(Vec<MatchRecord>, Roster, Option<Template>), UploadError> {
    let matches = read_schedule(&schedule.bytes)?;
    let roster = match roster {
        Some(file) => read_roster(&file.bytes)?,
        None => Roster::new(),
    };
    let template = match template {
        Some(file) => {
            let template = Template::load(file.bytes)?;
            log::info!(
                "Using uploaded template '{}' with {} placeholders",
                file.filename,
                template.placeholders().len()
            );
            Some(template)
        }
        None => None,
    };
    Ok((matches, roster, template))
}

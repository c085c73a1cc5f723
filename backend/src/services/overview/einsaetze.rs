use super::assignments::collect_assignments;
use super::pdf::{render_overview, Fonts};
use crate::config::Config;
use crate::error::OverviewError;
use crate::session::state::SessionState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::OverviewRequest;
use common::responses::ErrorResponse;

const OVERVIEW_FILENAME: &str = "einsaetze_uebersicht.pdf";

/// The Actix web handler for `POST /api/einsaetze`.
pub(crate) async fn process(
    state: web::Data<SessionState>,
    config: web::Data<Config>,
    payload: web::Json<OverviewRequest>,
) -> impl Responder {
    match overview(&state, &config, payload.into_inner()).await {
        Ok(pdf) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(crate::services::attachment(OVERVIEW_FILENAME))
            .body(pdf),
        Err(err) if err.is_client_error() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        Err(err) => {
            log::error!("Overview failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string()))
        }
    }
}

async fn overview(
    state: &SessionState,
    config: &Config,
    req: OverviewRequest,
) -> Result<Vec<u8>, OverviewError> {
    let teams: Vec<String> = req
        .teams
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if teams.is_empty() {
        return Err(OverviewError::NoTeams);
    }
    let session = state.current().await.ok_or(OverviewError::NoUpload)?;
    let assignments = collect_assignments(&session.matches, &teams);
    log::info!(
        "Overview for {} team(s): {} match(es)",
        teams.len(),
        assignments.len()
    );

    let fonts_dir = config.fonts_dir.clone();
    let family = config.font_family.clone();
    tokio::task::spawn_blocking(move || {
        let fonts = Fonts {
            dir: &fonts_dir,
            family: &family,
        };
        render_overview(&assignments, &teams, &fonts)
    })
    .await
    .map_err(|e| OverviewError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::report::Template;
    use crate::session::state::{Session, SessionState};
    use crate::test_support::{workbook_bytes, Cell::Text};
    use actix_web::{http::StatusCode, test, web, App};
    use common::model::roster::Roster;
    use common::model::schedule::MatchRecord;
    use std::sync::Arc;

    async fn call(
        state: SessionState,
        config: Config,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(config))
                .service(super::super::configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/einsaetze")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    async fn loaded_state() -> SessionState {
        let state = SessionState::new(None);
        let template = Template::load(workbook_bytes(&[("A1", Text("$HEIM"))])).unwrap();
        let record = MatchRecord {
            id: 1,
            team1: Some("Adler".to_string()),
            team2: Some("Falken".to_string()),
            ..MatchRecord::default()
        };
        state
            .replace(Session::new(vec![record], Roster::new(), Arc::new(template)))
            .await;
        state
    }

    #[actix_web::test]
    async fn blank_team_list_is_rejected() {
        let (status, body) = call(
            loaded_state().await,
            Config::default(),
            serde_json::json!({ "teams": ["", " "] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "no teams selected");
    }

    #[actix_web::test]
    async fn requires_an_upload() {
        let (status, body) = call(
            SessionState::new(None),
            Config::default(),
            serde_json::json!({ "teams": ["Adler"] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Please upload files first");
    }

    #[actix_web::test]
    async fn missing_fonts_are_a_server_error() {
        let fonts = tempfile::tempdir().unwrap();
        let config = Config {
            fonts_dir: fonts.path().to_path_buf(),
            ..Config::default()
        };

        let (status, body) = call(
            loaded_state().await,
            config,
            serde_json::json!({ "teams": ["Adler"] }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }
}

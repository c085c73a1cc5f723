mod config;
mod convert;
mod error;
mod ingest;
mod report;
mod services;
mod session;
#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::convert::{LibreOfficeConverter, PdfUniteMerger};
use crate::report::Template;
use crate::services::reports::ReportTools;
use crate::session::state::SessionState;
use actix_files::Files;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Loads the configured template, if any. Without one every upload has to
/// bring its own.
fn default_template(config: &Config) -> Option<Template> {
    if !config.template_path.exists() {
        warn!(
            "No template at {}; uploads must include one",
            config.template_path.display()
        );
        return None;
    }
    match Template::from_file(&config.template_path) {
        Ok(template) => {
            info!(
                "Loaded template {} with {} placeholders",
                config.template_path.display(),
                template.placeholders().len()
            );
            Some(template)
        }
        Err(e) => {
            warn!("Ignoring template: {}", e);
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::load().map_err(std::io::Error::other)?;
    let url = config.url();

    let state = SessionState::new(default_template(&config));
    let tools = ReportTools {
        converter: Arc::new(LibreOfficeConverter::new(
            config.converter_program.clone(),
            config.conversion_timeout(),
            config.work_dir.clone(),
        )),
        merger: Arc::new(PdfUniteMerger::new(
            config.merge_program.clone(),
            config.merge_timeout(),
        )),
        work_dir: config.work_dir.clone(),
    };

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);

    let bind = (config.host.clone(), config.port);
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        info!("No static directory at {}; serving the API only", static_dir.display());
    }
    let json_limit = config.max_upload_bytes;
    let config = web::Data::new(config);
    let state = web::Data::new(state);
    let tools = web::Data::new(tools);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(services::json_config(json_limit))
            .app_data(config.clone())
            .app_data(state.clone())
            .app_data(tools.clone())
            .service(services::configure_routes())
            .service(services::reports::configure_routes())
            .service(services::overview::configure_routes())
            // Catches the rest of /api, so it goes after the narrower scopes.
            .service(services::uploads::configure_routes());
        if serve_static {
            app.service(Files::new("/", static_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(bind)?
    .run()
    .await
}

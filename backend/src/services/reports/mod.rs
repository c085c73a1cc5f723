//! # Report Service Module
//!
//! `POST /api/generate` turns selected matches of the current upload into one
//! downloadable PDF.
//!
//! - `batch`: single vs. multi-match assembly on top of the report engine.
//! - `generate`: the HTTP handler, which runs `batch` on the blocking pool.

pub mod batch;
mod generate;

use crate::convert::{DocumentConverter, PdfMerger};
use actix_web::web::{post, scope};
use actix_web::Scope;
use std::path::PathBuf;
use std::sync::Arc;

const API_PATH: &str = "/api/generate";

/// External tools and scratch space used to produce PDFs.
#[derive(Clone)]
pub struct ReportTools {
    pub converter: Arc<dyn DocumentConverter>,
    pub merger: Arc<dyn PdfMerger>,
    pub work_dir: PathBuf,
}

/// Configures and returns the Actix `Scope` for report generation.
///
/// # Registered Routes:
///
/// *   **`POST /api/generate`**:
///     - **Handler**: `generate::process`
///     - **Description**: Accepts a JSON array of match ids (or an object with
///       `session_id` and `match_ids`) and streams back a single report or the
///       merged reports as `application/pdf`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(generate::process))
}

//! # Assignments Overview
//!
//! `POST /api/einsaetze` prints, for a set of teams, every match in which one of
//! them plays or referees. Team managers use it to plan who has to be where.
//!
//! - `assignments`: picks the relevant matches from the current upload.
//! - `pdf`: lays them out as a table with genpdf.

pub mod assignments;
mod einsaetze;
pub mod pdf;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/einsaetze";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(einsaetze::process))
}

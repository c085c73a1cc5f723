//! # Spielbericht engine
//!
//! Turns one schedule row into a filled copy of the Spielbericht template.
//!
//! - `placeholders`: finds the `$TOKEN` cells of a template once per upload.
//! - `resolver`: normalizes a schedule row and derives duration and pause.
//! - `roster`: picks the ten home and guest player slots for a match.
//! - `values`: the token -> text map for one match.
//! - `filler`: writes the map into the template cells.

pub mod filler;
pub mod placeholders;
pub mod resolver;
pub mod roster;
pub mod values;

use crate::error::TemplateError;
use common::model::schedule::MatchRecord;
use common::model::roster::Roster;
use filler::{fill_template, FilledReport};
use placeholders::{scan_placeholders, PlaceholderSet};
use std::path::Path;
use values::PlaceholderValues;

/// Template bytes together with the placeholders scanned from exactly those bytes.
#[derive(Debug)]
pub struct Template {
    bytes: Vec<u8>,
    placeholders: PlaceholderSet,
}

impl Template {
    pub fn load(bytes: Vec<u8>) -> Result<Self, TemplateError> {
        let placeholders = scan_placeholders(&bytes)?;
        if placeholders.is_empty() {
            log::warn!("Template has no $TOKEN cells; reports will be unfilled copies");
        } else {
            log::debug!("Template placeholders: {}", placeholders.tokens().join(", "));
        }
        Ok(Self {
            bytes,
            placeholders,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let bytes = std::fs::read(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(bytes)
    }

    pub fn placeholders(&self) -> &PlaceholderSet {
        &self.placeholders
    }

    pub fn fill(&self, values: &PlaceholderValues) -> Result<FilledReport, TemplateError> {
        fill_template(&self.bytes, &self.placeholders, values)
    }

    /// Resolves `record`, looks up its players and fills the template.
    pub fn fill_match(
        &self,
        record: &MatchRecord,
        roster: &Roster,
    ) -> Result<FilledReport, TemplateError> {
        let fields = resolver::resolve(record);
        let players = roster::lookup_players(roster, &fields);
        self.fill(&PlaceholderValues::for_match(&fields, &players))
    }
}

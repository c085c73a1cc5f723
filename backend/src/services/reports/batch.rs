//! # Batch assembly
//!
//! Produces the PDF for a `POST /api/generate` request.
//!
//! - One id: resolve, fill and convert that match, hand back its PDF.
//! - Several ids: ids that do not exist are skipped. The remaining matches are
//!   generated one after another in request order, each PDF written into a
//!   scratch directory owned by this job, then merged into one file. If only one
//!   id survives it is returned as is.
//!
//! Any failure while filling or converting a match aborts the whole request; so
//! does a failed merge. Cells that could not be filled are not failures: they are
//! collected in `GeneratedPdf::cell_errors`.

use crate::convert::{DocumentConverter, PdfMerger};
use crate::error::{CellWriteError, GenerateError, MergeError};
use crate::session::state::Session;
use common::model::schedule::MatchRecord;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const MERGED_FILENAME: &str = "spielberichte.pdf";

#[derive(Debug)]
pub struct GeneratedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Ids that made it into the PDF, in page order.
    pub match_ids: Vec<usize>,
    /// Requested ids that do not exist in the current upload.
    pub skipped: Vec<usize>,
    pub cell_errors: Vec<CellWriteError>,
}

/// `spielbericht_<id>_<team1>_vs_<team2>.pdf`, safe for a download header.
pub fn report_filename(record: &MatchRecord) -> String {
    format!(
        "spielbericht_{}_{}_vs_{}.pdf",
        record.id,
        record.team1.as_deref().unwrap_or_default(),
        record.team2.as_deref().unwrap_or_default()
    )
    .replace([' ', '/'], "_")
}

pub struct ReportGenerator<'a> {
    session: &'a Session,
    converter: &'a dyn DocumentConverter,
    merger: &'a dyn PdfMerger,
    work_dir: &'a Path,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(
        session: &'a Session,
        converter: &'a dyn DocumentConverter,
        merger: &'a dyn PdfMerger,
        work_dir: &'a Path,
    ) -> Self {
        Self {
            session,
            converter,
            merger,
            work_dir,
        }
    }

    pub fn generate(&self, ids: &[usize]) -> Result<GeneratedPdf, GenerateError> {
        match ids {
            [] => Err(GenerateError::NoMatchIds),
            [id] => {
                let record = self
                    .session
                    .match_by_id(*id)
                    .ok_or(GenerateError::InvalidMatchId(*id))?;
                self.single(record, Vec::new())
            }
            _ => self.batch(ids),
        }
    }

    fn single(
        &self,
        record: &MatchRecord,
        skipped: Vec<usize>,
    ) -> Result<GeneratedPdf, GenerateError> {
        let (bytes, cell_errors) = self.render(record)?;
        Ok(GeneratedPdf {
            filename: report_filename(record),
            bytes,
            match_ids: vec![record.id],
            skipped,
            cell_errors,
        })
    }

    fn batch(&self, ids: &[usize]) -> Result<GeneratedPdf, GenerateError> {
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        for &id in ids {
            match self.session.match_by_id(id) {
                Some(record) => records.push(record),
                None => skipped.push(id),
            }
        }
        if !skipped.is_empty() {
            log::warn!("Skipping unknown match ids {:?}", skipped);
        }

        match records.as_slice() {
            [] => return Err(GenerateError::NoValidMatches(skipped)),
            [record] => return self.single(record, skipped),
            _ => {}
        }

        let job_dir = tempfile::Builder::new()
            .prefix(&format!("batch-{}-", Uuid::new_v4()))
            .tempdir_in(self.work_dir)?;

        let mut parts: Vec<PathBuf> = Vec::with_capacity(records.len());
        let mut cell_errors = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let (pdf, errors) = self.render(record)?;
            let part = job_dir.path().join(format!("{:03}_{}.pdf", i + 1, record.id));
            fs::write(&part, pdf)?;
            parts.push(part);
            cell_errors.extend(errors);
            log::info!("Generated report {}/{} (match {})", i + 1, records.len(), record.id);
        }

        let merged = job_dir.path().join(MERGED_FILENAME);
        self.merger.merge(&parts, &merged)?;
        if !merged.exists() {
            return Err(MergeError::NoOutput.into());
        }

        Ok(GeneratedPdf {
            filename: MERGED_FILENAME.to_string(),
            bytes: fs::read(&merged)?,
            match_ids: records.iter().map(|r| r.id).collect(),
            skipped,
            cell_errors,
        })
    }

    fn render(
        &self,
        record: &MatchRecord,
    ) -> Result<(Vec<u8>, Vec<CellWriteError>), GenerateError> {
        let filled = self
            .session
            .template
            .fill_match(record, &self.session.roster)
            .map_err(|source| GenerateError::Template {
                match_id: record.id,
                source,
            })?;
        let pdf = self
            .converter
            .convert(&filled.bytes)
            .map_err(|source| GenerateError::Conversion {
                match_id: record.id,
                source,
            })?;
        Ok((pdf, filled.cell_errors))
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use crate::convert::{DocumentConverter, PdfMerger};
    use crate::error::{ConversionError, MergeError};
    use crate::test_support::cell_text;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// "Converts" a report into `PDF(<home team>)`, reading the home team from A1.
    #[derive(Default)]
    pub struct FakeConverter {
        pub fail_for: Option<&'static str>,
        pub calls: Mutex<usize>,
    }

    impl DocumentConverter for FakeConverter {
        fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConversionError> {
            *self.calls.lock().unwrap() += 1;
            let home = cell_text(document, "A1");
            if self.fail_for == Some(home.as_str()) {
                return Err(ConversionError::TimedOut(std::time::Duration::from_secs(30)));
            }
            Ok(format!("PDF({})", home).into_bytes())
        }
    }

    /// Concatenates the parts, remembering which files it was given.
    #[derive(Default)]
    pub struct FakeMerger {
        pub fail: bool,
        pub inputs: Mutex<Vec<PathBuf>>,
    }

    impl PdfMerger for FakeMerger {
        fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError> {
            self.inputs.lock().unwrap().extend(inputs.iter().cloned());
            if self.fail {
                return Err(MergeError::Failed {
                    status: "exit status: 1".to_string(),
                    stderr: "Syntax Error".to_string(),
                });
            }
            let mut merged = Vec::new();
            for input in inputs {
                merged.extend(fs::read(input)?);
            }
            fs::write(output, merged)?;
            Ok(())
        }
    }
}

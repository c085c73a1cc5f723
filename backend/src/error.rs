//! Error types shared by the report engine, the adapters and the HTTP handlers.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Problems with what the operator uploaded. Reported back as 400.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} must be an Excel file (.xlsx), got '{filename}'")]
    WrongExtension { field: String, filename: String },
    #[error("missing upload field '{0}'")]
    MissingField(&'static str),
    #[error("{field} exceeds the upload limit of {limit} bytes")]
    TooLarge { field: String, limit: usize },
    #[error("cannot read spreadsheet: {0}")]
    Spreadsheet(String),
    #[error("spreadsheet has no sheet named '{0}'")]
    MissingSheet(String),
    #[error("sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },
    #[error("upload failed: {0}")]
    Multipart(String),
}

/// The template cannot be read, scanned or written back.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is not a readable spreadsheet: {0}")]
    Unreadable(String),
    #[error("template has no worksheet")]
    NoWorksheet,
    #[error("cannot write filled template: {0}")]
    Write(String),
    #[error("placeholder list was scanned from a different template")]
    DigestMismatch,
    #[error("invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("cannot read template file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single placeholder cell that could not be filled. Never fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cell ({row},{column}) {token}: {reason}")]
pub struct CellWriteError {
    pub row: u32,
    pub column: u32,
    pub token: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("cannot start converter '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("converter timed out after {0:?}")]
    TimedOut(Duration),
    #[error("converter produced no PDF")]
    NoOutput,
    #[error("conversion I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("cannot start merge tool '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("merge tool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("merge tool timed out after {0:?}")]
    TimedOut(Duration),
    #[error("merge tool produced no PDF")]
    NoOutput,
    #[error("merge I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can stop a report generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Please upload files first")]
    NoUpload,
    #[error("no match ids given")]
    NoMatchIds,
    #[error("Invalid match ID {0}")]
    InvalidMatchId(usize),
    #[error("none of the requested match ids exist: {0:?}")]
    NoValidMatches(Vec<usize>),
    #[error("upload {requested} was replaced by a newer upload ({current})")]
    StaleSession { requested: Uuid, current: Uuid },
    #[error("match {match_id}: {source}")]
    Template {
        match_id: usize,
        source: TemplateError,
    },
    #[error("match {match_id}: {source}")]
    Conversion {
        match_id: usize,
        source: ConversionError,
    },
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report task failed: {0}")]
    Task(String),
}

impl GenerateError {
    /// Whether the caller asked for something that cannot be served, as opposed
    /// to the server failing to produce it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerateError::NoUpload
                | GenerateError::NoMatchIds
                | GenerateError::InvalidMatchId(_)
                | GenerateError::NoValidMatches(_)
        )
    }
}

/// Failures of the assignments overview.
#[derive(Debug, Error)]
pub enum OverviewError {
    #[error("Please upload files first")]
    NoUpload,
    #[error("no teams selected")]
    NoTeams,
    #[error("cannot load font family '{family}' from {dir}: {source}")]
    Fonts {
        dir: PathBuf,
        family: String,
        source: genpdf::error::Error,
    },
    #[error("cannot render overview: {0}")]
    Render(#[source] genpdf::error::Error),
    #[error("overview task failed: {0}")]
    Task(String),
}

impl OverviewError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, OverviewError::NoUpload | OverviewError::NoTeams)
    }
}

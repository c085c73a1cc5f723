//! Reads the uploaded schedule and roster workbooks.

mod cells;
pub mod players;
pub mod schedule;

use crate::error::InputError;
use calamine::{open_workbook_from_rs, Xlsx};
use std::io::Cursor;

/// Name of the schedule sheet in the tournament workbook.
pub const SCHEDULE_SHEET: &str = "Ergebnisse";

fn open_xlsx(bytes: &[u8]) -> Result<Xlsx<Cursor<&[u8]>>, InputError> {
    open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes))
        .map_err(|e| InputError::Spreadsheet(e.to_string()))
}

/// Checks the upload file name the way the upload form promises.
pub fn ensure_xlsx(field: &str, filename: &str) -> Result<(), InputError> {
    if filename.to_lowercase().ends_with(".xlsx") {
        Ok(())
    } else {
        Err(InputError::WrongExtension {
            field: field.to_string(),
            filename: filename.to_string(),
        })
    }
}

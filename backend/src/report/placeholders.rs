use crate::error::TemplateError;
use common::model::placeholder::Placeholder;
use regex::Regex;
use std::io::Cursor;
use umya_spreadsheet::{reader, Spreadsheet, Worksheet};

/// A cell is a placeholder only if its whole text matches.
const TOKEN_PATTERN: &str = r"^\$[A-Za-z0-9]+$";

/// Placeholders of one template, tagged with the md5 of the bytes they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    digest: String,
    items: Vec<Placeholder>,
}

impl PlaceholderSet {
    pub(crate) fn new(digest: String, items: Vec<Placeholder>) -> Self {
        Self { digest, items }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.items.iter().map(|p| p.token.as_str()).collect()
    }
}

pub(crate) fn digest_of(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

pub(crate) fn read_workbook(bytes: &[u8]) -> Result<Spreadsheet, TemplateError> {
    let book = reader::xlsx::read_reader(Cursor::new(bytes), true)
        .map_err(|e| TemplateError::Unreadable(format!("{:?}", e)))?;
    if book.get_sheet_collection().is_empty() {
        return Err(TemplateError::NoWorksheet);
    }
    Ok(book)
}

/// Scans the active sheet of `bytes` for placeholder cells, row by row.
pub fn scan_placeholders(bytes: &[u8]) -> Result<PlaceholderSet, TemplateError> {
    let book = read_workbook(bytes)?;
    let pattern = Regex::new(TOKEN_PATTERN)?;
    let items = scan_sheet(book.get_active_sheet(), &pattern);
    log::debug!("Found {} placeholders in template", items.len());
    Ok(PlaceholderSet::new(digest_of(bytes), items))
}

fn scan_sheet(sheet: &Worksheet, pattern: &Regex) -> Vec<Placeholder> {
    let (max_column, max_row) = sheet.get_highest_column_and_row();
    let mut found = Vec::new();
    for row in 1..=max_row {
        for column in 1..=max_column {
            let Some(cell) = sheet.get_cell((column, row)) else {
                continue;
            };
            let value = cell.get_value();
            if pattern.is_match(&value) {
                found.push(Placeholder {
                    row,
                    column,
                    token: value.to_string(),
                });
            }
        }
    }
    found
}

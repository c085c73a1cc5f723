//! In-memory spreadsheet fixtures for unit tests.

use std::io::Cursor;
use umya_spreadsheet::Worksheet;

#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
}

fn put(sheet: &mut Worksheet, cells: &[(&str, Cell)]) {
    for (coordinate, cell) in cells {
        let target = sheet.get_cell_mut(*coordinate);
        match cell {
            Cell::Text(text) => {
                target.set_value_string(*text);
            }
            Cell::Number(number) => {
                target.set_value_number(*number);
            }
        }
    }
}

/// A single-sheet workbook with the given cells.
pub fn workbook_bytes(cells: &[(&str, Cell)]) -> Vec<u8> {
    sheets_bytes(&[("Sheet1", cells.to_vec())])
}

/// A workbook with one named sheet per entry, the first one active.
pub fn sheets_bytes(sheets: &[(&str, Vec<(&str, Cell)>)]) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file();
    for (index, (name, cells)) in sheets.iter().enumerate() {
        let sheet = if index == 0 {
            let sheet = book.get_active_sheet_mut();
            sheet.set_name(*name);
            sheet
        } else {
            book.new_sheet(*name).unwrap()
        };
        put(sheet, cells);
    }
    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).unwrap();
    out.into_inner()
}

/// Reads back the text of one cell of the active sheet.
pub fn cell_text(bytes: &[u8], coordinate: &str) -> String {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
    book.get_active_sheet()
        .get_cell(coordinate)
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

/// Whether a cell of the active sheet is formatted to wrap text.
pub fn cell_wraps(bytes: &[u8], coordinate: &str) -> bool {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
    book.get_active_sheet()
        .get_cell(coordinate)
        .and_then(|cell| cell.get_style().get_alignment())
        .map(|alignment| alignment.get_wrap_text().to_owned())
        .unwrap_or(false)
}

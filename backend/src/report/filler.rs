use super::placeholders::{digest_of, read_workbook, PlaceholderSet};
use super::values::PlaceholderValues;
use crate::error::{CellWriteError, TemplateError};
use common::model::placeholder::Placeholder;
use std::io::Cursor;
use umya_spreadsheet::{writer, HorizontalAlignmentValues, VerticalAlignmentValues, Worksheet};

/// Longest text an xlsx cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

/// A filled Spielbericht workbook plus the placeholder cells that were skipped.
#[derive(Debug, Clone)]
pub struct FilledReport {
    pub bytes: Vec<u8>,
    pub cell_errors: Vec<CellWriteError>,
}

/// Writes `values` into every placeholder cell of the template.
///
/// A cell that cannot be written is logged, recorded in `cell_errors` and left
/// as it was; the remaining cells are still filled. Only failures that affect
/// the whole workbook are returned as `Err`.
pub fn fill_template(
    bytes: &[u8],
    placeholders: &PlaceholderSet,
    values: &PlaceholderValues,
) -> Result<FilledReport, TemplateError> {
    if placeholders.digest() != digest_of(bytes) {
        return Err(TemplateError::DigestMismatch);
    }
    if values.is_empty() {
        log::warn!("Filling template without any values");
    }
    log::debug!(
        "Filling {} placeholder cell(s) from {} value(s)",
        placeholders.len(),
        values.len()
    );
    let mut book = read_workbook(bytes)?;
    let sheet = book.get_active_sheet_mut();

    let mut cell_errors = Vec::new();
    for placeholder in placeholders.iter() {
        if let Err(err) = write_cell(sheet, placeholder, values.get(&placeholder.token)) {
            log::warn!("Skipping placeholder cell: {}", err);
            cell_errors.push(err);
        }
    }

    let mut out = Cursor::new(Vec::new());
    writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| TemplateError::Write(format!("{:?}", e)))?;
    Ok(FilledReport {
        bytes: out.into_inner(),
        cell_errors,
    })
}

fn write_cell(
    sheet: &mut Worksheet,
    placeholder: &Placeholder,
    value: &str,
) -> Result<(), CellWriteError> {
    let position = (placeholder.column, placeholder.row);
    let fail = |reason: String| CellWriteError {
        row: placeholder.row,
        column: placeholder.column,
        token: placeholder.token.clone(),
        reason,
    };

    let current = sheet
        .get_cell(position)
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default();
    if current != placeholder.token {
        return Err(fail(format!("cell holds '{}' instead of the token", current)));
    }
    if value.chars().count() > MAX_CELL_CHARS {
        return Err(fail(format!(
            "value exceeds the {} character cell limit",
            MAX_CELL_CHARS
        )));
    }

    let cell = sheet.get_cell_mut(position);
    cell.set_value_string(value);
    if value.contains('\n') {
        let alignment = cell.get_style_mut().get_alignment_mut();
        alignment.set_wrap_text(true);
        alignment.set_vertical(VerticalAlignmentValues::Top);
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::placeholders::scan_placeholders;
    use crate::test_support::{cell_text, cell_wraps, workbook_bytes, Cell::*};

    fn template() -> Vec<u8> {
        workbook_bytes(&[
            ("A1", Text("Spielbericht")),
            ("B1", Text("$NO")),
            ("A2", Text("$HEIM")),
            ("C2", Text("$GEGNER")),
            ("A3", Text("$SCHIRI2")),
            ("A4", Text("$VERMERK")),
            ("A5", Text("$UNBEKANNT")),
            ("B5", Number(42.0)),
        ])
    }

    fn values() -> PlaceholderValues {
        let mut values = PlaceholderValues::new();
        values.insert("$NO", "3");
        values.insert("$HEIM", "Adler");
        values.insert("$GEGNER", "Falken");
        values.insert("$SCHIRI2", "");
        values.insert("$VERMERK", "Gruppe A");
        values
    }

    #[test]
    fn fills_every_placeholder_and_nothing_else() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let report = fill_template(&bytes, &set, &values()).unwrap();

        assert!(report.cell_errors.is_empty());
        assert_eq!(cell_text(&report.bytes, "A1"), "Spielbericht");
        assert_eq!(cell_text(&report.bytes, "B1"), "3");
        assert_eq!(cell_text(&report.bytes, "A2"), "Adler");
        assert_eq!(cell_text(&report.bytes, "C2"), "Falken");
        assert_eq!(cell_text(&report.bytes, "B5"), "42");
    }

    #[test]
    fn missing_values_are_written_as_empty_text() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let report = fill_template(&bytes, &set, &values()).unwrap();

        assert_eq!(cell_text(&report.bytes, "A3"), "");
        assert_eq!(cell_text(&report.bytes, "A5"), "");
    }

    #[test]
    fn refilled_document_has_no_placeholders_left() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let report = fill_template(&bytes, &set, &values()).unwrap();

        assert!(scan_placeholders(&report.bytes).unwrap().is_empty());
    }

    #[test]
    fn multi_line_values_wrap() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let mut values = values();
        values.insert("$VERMERK", "Gruppe A\nSpiel um Platz 3");
        let report = fill_template(&bytes, &set, &values).unwrap();

        assert_eq!(cell_text(&report.bytes, "A4"), "Gruppe A\nSpiel um Platz 3");
        assert!(cell_wraps(&report.bytes, "A4"));
        assert!(!cell_wraps(&report.bytes, "A2"));
    }

    #[test]
    fn broken_cell_is_skipped_and_reported() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let mut items: Vec<Placeholder> = set.iter().cloned().collect();
        // Point one entry at a cell that does not hold its token.
        items[1].row = 1;
        items[1].column = 1;
        let tampered = PlaceholderSet::new(set.digest().to_string(), items);

        let report = fill_template(&bytes, &tampered, &values()).unwrap();

        assert_eq!(report.cell_errors.len(), 1);
        assert_eq!(report.cell_errors[0].token, "$HEIM");
        assert_eq!(cell_text(&report.bytes, "A1"), "Spielbericht");
        assert_eq!(cell_text(&report.bytes, "C2"), "Falken");
    }

    #[test]
    fn oversized_value_is_skipped() {
        let bytes = template();
        let set = scan_placeholders(&bytes).unwrap();
        let mut values = values();
        values.insert("$GEGNER", "x".repeat(MAX_CELL_CHARS + 1));
        let report = fill_template(&bytes, &set, &values).unwrap();

        assert_eq!(report.cell_errors.len(), 1);
        assert_eq!(report.cell_errors[0].token, "$GEGNER");
        assert_eq!(cell_text(&report.bytes, "A2"), "Adler");
    }

    #[test]
    fn placeholders_of_another_template_are_rejected() {
        let bytes = template();
        let other = workbook_bytes(&[("A1", Text("$HEIM"))]);
        let set = scan_placeholders(&other).unwrap();

        let err = fill_template(&bytes, &set, &values()).unwrap_err();
        assert!(matches!(err, TemplateError::DigestMismatch));
    }
}

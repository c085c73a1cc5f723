use super::cells::cell_text;
use super::open_xlsx;
use crate::error::InputError;
use calamine::Reader;
use common::model::roster::{Player, Roster};

const TEAM: &str = "Team";
const NUMBER: &str = "Nummer";
const NAME: &str = "Name";

/// Reads a roster workbook: one sheet per league, named like the league in the
/// schedule, with "Team", "Nummer" and "Name" columns.
pub fn read_roster(bytes: &[u8]) -> Result<Roster, InputError> {
    let mut workbook = open_xlsx(bytes)?;
    let mut roster = Roster::new();

    for league in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&league)
            .map_err(|e| InputError::Spreadsheet(e.to_string()))?;
        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            continue;
        };
        let header: Vec<String> = header
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default().trim().to_string())
            .collect();
        let column = |name: &str| header.iter().position(|h| h == name);

        let Some(team_column) = column(TEAM) else {
            log::warn!("Roster sheet '{}' has no '{}' column, skipping", league, TEAM);
            continue;
        };
        let number_column = column(NUMBER);
        let name_column = column(NAME);

        for row in rows {
            let Some(team) = row.get(team_column).and_then(cell_text) else {
                continue;
            };
            let player = Player {
                number: number_column.and_then(|i| row.get(i)).and_then(cell_text),
                name: name_column.and_then(|i| row.get(i)).and_then(cell_text),
            };
            roster.push(&league, &team, player);
        }
    }

    log::info!("Read roster with {} teams", roster.team_count());
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sheets_bytes, Cell::*};

    #[test]
    fn one_sheet_per_league() {
        let bytes = sheets_bytes(&[
            (
                "U12",
                vec![
                    ("A1", Text("Team")),
                    ("B1", Text("Nummer")),
                    ("C1", Text("Name")),
                    ("A2", Text("Adler")),
                    ("B2", Number(7.0)),
                    ("C2", Text("Anna")),
                    ("A3", Text("Adler")),
                    ("C3", Text("Ben")),
                    ("A4", Text("Falken")),
                    ("B4", Number(11.0)),
                    ("C4", Text("Cleo")),
                ],
            ),
            (
                "U14",
                vec![
                    ("A1", Text("Team")),
                    ("B1", Text("Nummer")),
                    ("C1", Text("Name")),
                    ("A2", Text("Adler")),
                    ("B2", Number(4.0)),
                    ("C2", Text("Dora")),
                ],
            ),
        ]);

        let roster = read_roster(&bytes).unwrap();

        let adler = roster.players("U12", "Adler");
        assert_eq!(adler.len(), 2);
        assert_eq!(adler[0].number.as_deref(), Some("7"));
        assert_eq!(adler[0].name.as_deref(), Some("Anna"));
        assert_eq!(adler[1].number, None);
        assert_eq!(roster.players("U12", "Falken")[0].number.as_deref(), Some("11"));
        assert_eq!(roster.players("U14", "Adler")[0].name.as_deref(), Some("Dora"));
    }

    #[test]
    fn sheets_without_team_column_and_rows_without_team_are_skipped() {
        let bytes = sheets_bytes(&[
            ("Hinweise", vec![("A1", Text("Bitte ausfüllen"))]),
            (
                "U16",
                vec![
                    ("A1", Text("Team")),
                    ("B1", Text("Name")),
                    ("B2", Text("Ohne Team")),
                    ("A3", Text("Raben")),
                    ("B3", Text("Emil")),
                ],
            ),
        ]);

        let roster = read_roster(&bytes).unwrap();

        assert_eq!(roster.team_count(), 1);
        assert_eq!(roster.players("U16", "Raben")[0].name.as_deref(), Some("Emil"));
        assert_eq!(roster.players("U16", "Raben")[0].number, None);
    }
}

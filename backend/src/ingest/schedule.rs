use super::cells::{cell_json, cell_text};
use super::{open_xlsx, SCHEDULE_SHEET};
use crate::error::InputError;
use calamine::Reader;
use common::model::schedule::MatchRecord;

const DATE: &str = "Tag";
const START_TIME: &str = "Startzeit";
const FIELD: &str = "Feld";
const LEAGUE: &str = "Liga";
const GROUP: &str = "Gruppe";
const TEAM1: &str = "Team 1";
const TEAM2: &str = "Team 2";
const REFEREE1: &str = "Schiedsrichter";
const REFEREE2: &str = "Schiedsrichter 2";

const KNOWN_COLUMNS: &[&str] = &[
    DATE, START_TIME, FIELD, LEAGUE, GROUP, TEAM1, TEAM2, REFEREE1, REFEREE2, "id",
];
const REQUIRED_COLUMNS: &[&str] = &[TEAM1, TEAM2];

/// Reads the "Ergebnisse" sheet into match records with 1-based ids.
///
/// Blank rows are dropped before ids are assigned, so ids match what the
/// operator sees as the n-th match of the schedule.
pub fn read_schedule(bytes: &[u8]) -> Result<Vec<MatchRecord>, InputError> {
    let mut workbook = open_xlsx(bytes)?;
    if !workbook.sheet_names().iter().any(|name| name == SCHEDULE_SHEET) {
        return Err(InputError::MissingSheet(SCHEDULE_SHEET.to_string()));
    }
    let range = workbook
        .worksheet_range(SCHEDULE_SHEET)
        .map_err(|e| InputError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| cell_text(cell).unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let column = |name: &str| header.iter().position(|h| h == name);

    for required in REQUIRED_COLUMNS {
        if column(required).is_none() {
            return Err(InputError::MissingColumn {
                sheet: SCHEDULE_SHEET.to_string(),
                column: required.to_string(),
            });
        }
    }

    let mut matches = Vec::new();
    for row in rows {
        if row.iter().all(|cell| cell_text(cell).is_none()) {
            continue;
        }
        let text = |name: &str| column(name).and_then(|i| row.get(i)).and_then(cell_text);

        let mut record = MatchRecord {
            id: matches.len() + 1,
            date: text(DATE),
            start_time: text(START_TIME),
            field: text(FIELD),
            league: text(LEAGUE),
            group: text(GROUP),
            team1: text(TEAM1),
            team2: text(TEAM2),
            referee1: text(REFEREE1),
            referee2: text(REFEREE2),
            ..MatchRecord::default()
        };
        for (i, name) in header.iter().enumerate() {
            if name.is_empty() || KNOWN_COLUMNS.contains(&name.as_str()) {
                continue;
            }
            let value = row.get(i).map(cell_json).unwrap_or(serde_json::Value::Null);
            record.extra.insert(name.clone(), value);
        }
        matches.push(record);
    }

    log::info!("Read {} matches from '{}'", matches.len(), SCHEDULE_SHEET);
    Ok(matches)
}

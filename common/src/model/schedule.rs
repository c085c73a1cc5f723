use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of the "Ergebnisse" sheet of an uploaded schedule.
///
/// The field names serialize to the original column headers so the match list
/// returned by the upload endpoint looks like the spreadsheet the operator
/// uploaded. Absent cells serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based position of the match in the schedule.
    pub id: usize,
    #[serde(rename = "Tag")]
    pub date: Option<String>,
    #[serde(rename = "Startzeit")]
    pub start_time: Option<String>,
    #[serde(rename = "Feld")]
    pub field: Option<String>,
    #[serde(rename = "Liga")]
    pub league: Option<String>,
    #[serde(rename = "Gruppe")]
    pub group: Option<String>,
    #[serde(rename = "Team 1")]
    pub team1: Option<String>,
    #[serde(rename = "Team 2")]
    pub team2: Option<String>,
    #[serde(rename = "Schiedsrichter")]
    pub referee1: Option<String>,
    #[serde(rename = "Schiedsrichter 2")]
    pub referee2: Option<String>,
    /// Any further columns of the sheet, already scrubbed of NaN/Infinity.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MatchRecord {
    /// "Team 1 vs Team 2", with empty names for missing teams.
    pub fn pairing(&self) -> String {
        format!(
            "{} vs {}",
            self.team1.as_deref().unwrap_or_default(),
            self.team2.as_deref().unwrap_or_default()
        )
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single roster line. Both columns are optional in the uploaded sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: Option<String>,
    pub name: Option<String>,
}

/// Players per team per league, in the order they appear in the roster file.
///
/// A league or team that was never pushed simply has no players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    leagues: HashMap<String, HashMap<String, Vec<Player>>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, league: &str, team: &str, player: Player) {
        self.leagues
            .entry(league.trim().to_string())
            .or_default()
            .entry(team.trim().to_string())
            .or_default()
            .push(player);
    }

    pub fn players(&self, league: &str, team: &str) -> &[Player] {
        self.leagues
            .get(league.trim())
            .and_then(|teams| teams.get(team.trim()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }

    pub fn team_count(&self) -> usize {
        self.leagues.values().map(HashMap::len).sum()
    }
}

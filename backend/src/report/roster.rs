use super::resolver::MatchFields;
use common::model::roster::{Player, Roster};

/// Rows per team on the Spielbericht.
pub const SLOTS_PER_TEAM: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSlot {
    /// Shirt number followed by a space, or empty.
    pub number: String,
    pub name: String,
}

impl From<&Player> for PlayerSlot {
    fn from(player: &Player) -> Self {
        let number = match player.number.as_deref() {
            Some(number) if !number.is_empty() => format!("{} ", number),
            _ => String::new(),
        };
        Self {
            number,
            name: player.name.clone().unwrap_or_default(),
        }
    }
}

/// Always exactly `SLOTS_PER_TEAM` slots per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlayers {
    pub home: Vec<PlayerSlot>,
    pub guest: Vec<PlayerSlot>,
}

fn team_slots(players: &[Player]) -> Vec<PlayerSlot> {
    let mut slots: Vec<PlayerSlot> = players
        .iter()
        .take(SLOTS_PER_TEAM)
        .map(PlayerSlot::from)
        .collect();
    slots.resize(SLOTS_PER_TEAM, PlayerSlot::default());
    slots
}

/// Home is team 1, guest is team 2, both looked up in the match's league.
pub fn lookup_players(roster: &Roster, fields: &MatchFields) -> MatchPlayers {
    MatchPlayers {
        home: team_slots(roster.players(&fields.league, &fields.team1)),
        guest: team_slots(roster.players(&fields.league, &fields.team2)),
    }
}

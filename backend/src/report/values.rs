use super::resolver::MatchFields;
use super::roster::MatchPlayers;
use std::collections::HashMap;

/// Token -> cell text for one match. Tokens carry their leading `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderValues {
    values: HashMap<String, String>,
}

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    /// Unknown tokens read as empty text.
    pub fn get(&self, token: &str) -> &str {
        self.values.get(token).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn for_match(fields: &MatchFields, players: &MatchPlayers) -> Self {
        let mut values = Self::new();
        values.insert("$HEIM", fields.team1.as_str());
        values.insert("$GEGNER", fields.team2.as_str());
        values.insert("$SCHIRI", fields.referee1.as_str());
        values.insert("$SCHIRI2", fields.referee2.as_str());
        values.insert("$DATE", fields.date.as_str());
        values.insert("$TIME", fields.time.as_str());
        values.insert("$FIELD", fields.field.as_str());
        values.insert("$LIGA", fields.league.as_str());
        values.insert("$NO", fields.id.as_str());
        values.insert("$VERMERK", fields.remark.as_str());
        values.insert("$DURATION", fields.duration.as_str());
        values.insert("$PAUSE", fields.pause.as_str());

        for (i, slot) in players.home.iter().enumerate() {
            values.insert(format!("$NAMEH{}", i + 1), slot.name.as_str());
            values.insert(format!("$NH{}", i + 1), slot.number.as_str());
        }
        for (i, slot) in players.guest.iter().enumerate() {
            values.insert(format!("$NAMEG{}", i + 1), slot.name.as_str());
            values.insert(format!("$NG{}", i + 1), slot.number.as_str());
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::roster::{PlayerSlot, SLOTS_PER_TEAM};

    fn players() -> MatchPlayers {
        let mut home = vec![PlayerSlot::default(); SLOTS_PER_TEAM];
        home[0] = PlayerSlot {
            number: "7 ".to_string(),
            name: "Anna".to_string(),
        };
        let mut guest = vec![PlayerSlot::default(); SLOTS_PER_TEAM];
        guest[9] = PlayerSlot {
            number: "99 ".to_string(),
            name: "Zoe".to_string(),
        };
        MatchPlayers { home, guest }
    }

    #[test]
    fn covers_the_whole_vocabulary() {
        let fields = MatchFields {
            id: "3".to_string(),
            team1: "Adler".to_string(),
            team2: "Falken".to_string(),
            remark: "Gruppe A".to_string(),
            duration: "2x7 Minuten".to_string(),
            ..MatchFields::default()
        };
        let values = PlaceholderValues::for_match(&fields, &players());

        // 12 match tokens plus 4 x 10 player tokens
        assert_eq!(values.len(), 52);
        assert_eq!(values.get("$HEIM"), "Adler");
        assert_eq!(values.get("$GEGNER"), "Falken");
        assert_eq!(values.get("$NO"), "3");
        assert_eq!(values.get("$VERMERK"), "Gruppe A");
        assert_eq!(values.get("$DURATION"), "2x7 Minuten");
        assert_eq!(values.get("$NAMEH1"), "Anna");
        assert_eq!(values.get("$NH1"), "7 ");
        assert_eq!(values.get("$NAMEG10"), "Zoe");
        assert_eq!(values.get("$NG10"), "99 ");
        assert_eq!(values.get("$NAMEH2"), "");
    }

    #[test]
    fn unknown_tokens_are_empty() {
        let values = PlaceholderValues::new();
        assert_eq!(values.get("$SPONSOR"), "");
        assert!(values.is_empty());
    }
}

use common::model::schedule::MatchRecord;

/// How a selected team takes part in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Player(String),
    Referee(String),
}

/// One row of the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub match_id: usize,
    /// Date and start time, space separated.
    pub time: String,
    pub teams: String,
    pub league: String,
    pub involvement: Vec<Role>,
}

/// Matches in which any of `teams` plays or referees, in schedule order.
///
/// Team names are compared after trimming. A team that plays and also appears
/// as referee of the same match gets both roles.
pub fn collect_assignments(matches: &[MatchRecord], teams: &[String]) -> Vec<Assignment> {
    let is = |cell: &Option<String>, team: &str| cell.as_deref().map(str::trim) == Some(team);

    matches
        .iter()
        .filter_map(|record| {
            let mut involvement = Vec::new();
            for team in teams.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
                if is(&record.team1, team) || is(&record.team2, team) {
                    involvement.push(Role::Player(team.to_string()));
                }
                if is(&record.referee1, team) || is(&record.referee2, team) {
                    involvement.push(Role::Referee(team.to_string()));
                }
            }
            if involvement.is_empty() {
                return None;
            }
            let time = [record.date.as_deref(), record.start_time.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            Some(Assignment {
                match_id: record.id,
                time,
                teams: record.pairing(),
                league: record.league.clone().unwrap_or_default(),
                involvement,
            })
        })
        .collect()
}

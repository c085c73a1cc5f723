use common::model::schedule::MatchRecord;

/// Playing time and break for an age category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRule {
    pub patterns: &'static [&'static str],
    pub duration: &'static str,
    pub pause: &'static str,
}

/// Checked in order against the lowercased league and group; the first hit wins.
pub const AGE_RULES: &[AgeRule] = &[
    AgeRule {
        patterns: &["u12", "u-12", "u 12"],
        duration: "2x7 Minuten",
        pause: "3 Minuten",
    },
    AgeRule {
        patterns: &["u14", "u-14", "u 14", "u16", "u-16", "u 16"],
        duration: "2x10 Minuten",
        pause: "5 Minuten",
    },
];

/// A schedule row with every text field present, ready for the template.
///
/// Missing cells are empty strings. `duration` and `pause` are empty when no
/// age rule matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFields {
    pub id: String,
    pub date: String,
    pub time: String,
    pub field: String,
    pub league: String,
    pub group: String,
    pub team1: String,
    pub team2: String,
    pub referee1: String,
    pub referee2: String,
    pub duration: String,
    pub pause: String,
    pub remark: String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Finds the age rule for a league/group pair.
pub fn age_rule(league: &str, group: &str) -> Option<&'static AgeRule> {
    let category = format!("{}{}", league, group).to_lowercase();
    AGE_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| category.contains(p)))
}

pub fn resolve(record: &MatchRecord) -> MatchFields {
    let league = text(&record.league);
    let group = text(&record.group);
    let (duration, pause) = age_rule(&league, &group)
        .map(|rule| (rule.duration.to_string(), rule.pause.to_string()))
        .unwrap_or_default();

    MatchFields {
        id: record.id.to_string(),
        date: text(&record.date),
        time: text(&record.start_time),
        field: text(&record.field),
        team1: text(&record.team1),
        team2: text(&record.team2),
        referee1: text(&record.referee1),
        referee2: text(&record.referee2),
        remark: group.clone(),
        league,
        group,
        duration,
        pause,
    }
}

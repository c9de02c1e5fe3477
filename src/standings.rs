use std::collections::HashMap;

use serde::Serialize;

use crate::table::{Cell, TableRow};
use crate::team_matches::TeamMatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StandingsRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "GP")]
    pub games_played: u32,
    #[serde(rename = "W")]
    pub wins: u32,
    #[serde(rename = "D")]
    pub draws: u32,
    #[serde(rename = "L")]
    pub losses: u32,
    #[serde(rename = "GF")]
    pub goals_for: u32,
    #[serde(rename = "GA")]
    pub goals_against: u32,
    #[serde(rename = "GD")]
    pub goal_difference: i64,
    #[serde(rename = "FP")]
    pub fair_play: i64,
    #[serde(rename = "Points")]
    pub points: u32,
}

impl StandingsRow {
    fn add(&mut self, record: &TeamMatchRecord) {
        self.games_played += 1;
        self.wins += record.win;
        self.draws += record.draw;
        self.losses += record.loss;
        self.goals_for += record.goals_for;
        self.goals_against += record.goals_against;
        self.fair_play += record.fair_play;
        self.points += record.points;
    }
}

impl TableRow for StandingsRow {
    const COLUMNS: &'static [&'static str] =
        &["Team", "GP", "W", "D", "L", "GF", "GA", "GD", "FP", "Points"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team.as_str().into(),
            self.games_played.into(),
            self.wins.into(),
            self.draws.into(),
            self.losses.into(),
            self.goals_for.into(),
            self.goals_against.into(),
            self.goal_difference.into(),
            self.fair_play.into(),
            self.points.into(),
        ]
    }
}

/// Points table: points first, then goal difference, both descending.
///
/// No further tie-break is applied; level teams keep the order in which they
/// first appear in the records.
pub fn standings(records: &[TeamMatchRecord]) -> Vec<StandingsRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<StandingsRow> = Vec::new();

    for record in records {
        let slot = *index.entry(record.team.as_str()).or_insert_with(|| {
            rows.push(StandingsRow {
                team: record.team.clone(),
                ..StandingsRow::default()
            });
            rows.len() - 1
        });
        rows[slot].add(record);
    }

    for row in &mut rows {
        row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_match::RawMatch;
    use crate::team_matches::normalize;

    #[test]
    fn level_teams_keep_first_seen_order() {
        let matches = [
            RawMatch::new(2019, "France", "Zambia", "Chile", 1, 1),
            RawMatch::new(2019, "France", "Brazil", "Argentina", 1, 1),
        ];
        let rows = standings(&normalize(&matches));
        let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Zambia", "Chile", "Brazil", "Argentina"]);
    }

    #[test]
    fn goal_difference_breaks_points_tie() {
        let matches = [
            RawMatch::new(2015, "Canada", "A", "B", 1, 0),
            RawMatch::new(2015, "Canada", "C", "D", 4, 0),
        ];
        let rows = standings(&normalize(&matches));
        assert_eq!(rows[0].team, "C");
        assert_eq!(rows[0].goal_difference, 4);
        assert_eq!(rows[1].team, "A");
        assert_eq!(rows[2].team, "B");
        assert_eq!(rows[3].team, "D");
    }
}

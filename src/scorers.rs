use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::event_codec::{self, EventField};
use crate::raw_match::{RawMatch, Side};
use crate::table::{Cell, TableRow};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorerOptions {
    pub include_penalties: bool,
    pub limit: usize,
}

impl Default for ScorerOptions {
    fn default() -> Self {
        Self {
            include_penalties: true,
            limit: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerRow {
    #[serde(rename = "Position")]
    pub position: u32,
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Goals")]
    pub goals: u32,
}

impl TableRow for ScorerRow {
    const COLUMNS: &'static [&'static str] = &["Position", "Player", "Team", "Goals"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.position.into(),
            self.player.as_str().into(),
            self.team.as_str().into(),
            self.goals.into(),
        ]
    }
}

/// Goal-scorer ranking over raw match rows.
///
/// Goals are counted per (player, team) pair. Positions use competition
/// ranking: tied players share the best position and the next count skips
/// ahead by the size of the tie (1, 2, 2, 4). Within a position rows are
/// listed by player name.
pub fn top_scorers(matches: &[RawMatch], options: ScorerOptions) -> Vec<ScorerRow> {
    let mut tally = GoalTally::default();

    for side in Side::BOTH {
        for raw in matches {
            let view = raw.side(side);
            for player in open_play_scorers(view.goal_details) {
                tally.add(player, view.team);
            }
        }
    }

    if options.include_penalties {
        for side in Side::BOTH {
            for raw in matches {
                let view = raw.side(side);
                for player in event_codec::decode_penalty_field(view.penalty_goals) {
                    tally.add(player, view.team);
                }
            }
        }
    }

    let mut rows = tally.into_rows();
    rows.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.player.cmp(&b.player))
    });
    rows.truncate(options.limit);
    rows
}

fn open_play_scorers(field: &EventField) -> Vec<String> {
    event_codec::decode_list_field(field)
        .iter()
        .filter_map(|event| {
            let scorer = event_codec::extract_scorer(event);
            if scorer.is_none() {
                warn!(event = %event, "goal event without a scorer slot; skipping");
            }
            scorer.map(str::to_string)
        })
        .collect()
}

#[derive(Default)]
struct GoalTally {
    index: HashMap<(String, String), usize>,
    counts: Vec<(String, String, u32)>,
}

impl GoalTally {
    fn add(&mut self, player: String, team: &str) {
        if player.is_empty() {
            return;
        }
        let key = (player, team.to_string());
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].2 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key.0, key.1, 1));
            }
        }
    }

    fn into_rows(mut self) -> Vec<ScorerRow> {
        self.counts.sort_by(|a, b| b.2.cmp(&a.2));
        let mut rows = Vec::with_capacity(self.counts.len());
        let mut position = 0u32;
        let mut previous = None;
        for (seen, (player, team, goals)) in self.counts.into_iter().enumerate() {
            if previous != Some(goals) {
                position = seen as u32 + 1;
                previous = Some(goals);
            }
            rows.push(ScorerRow {
                position,
                player,
                team,
                goals,
            });
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_goals(home: &[&str], away: &[&str]) -> RawMatch {
        RawMatch {
            home_goals: EventField::list(home.iter().map(|p| format!("10|Goal|{p}"))),
            away_goals: EventField::list(away.iter().map(|p| format!("80|Goal|{p}"))),
            ..RawMatch::new(2023, "Australia", "H", "A", home.len() as u32, away.len() as u32)
        }
    }

    #[test]
    fn ranking_skips_after_ties() {
        let matches = [with_goals(&["Bo", "Bo", "Al", "Al", "Cy"], &["Di"])];
        let rows = top_scorers(&matches, ScorerOptions::default());
        let summary: Vec<(u32, &str, u32)> = rows
            .iter()
            .map(|r| (r.position, r.player.as_str(), r.goals))
            .collect();
        assert_eq!(summary, vec![(1, "Al", 2), (1, "Bo", 2), (3, "Cy", 1), (3, "Di", 1)]);
    }

    #[test]
    fn blank_scorer_names_are_not_counted() {
        let raw = RawMatch {
            home_penalty_goals: EventField::text("|Ann·12"),
            ..RawMatch::new(2011, "Germany", "H", "A", 1, 0)
        };
        let rows = top_scorers(&[raw], ScorerOptions::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player, "Ann");
    }

    #[test]
    fn blank_open_play_scorer_is_not_counted() {
        let raw = RawMatch {
            home_goals: EventField::text("['10||', '20| Goal |  ', '30|Goal|Ann']"),
            ..RawMatch::new(2011, "Germany", "H", "A", 3, 0)
        };
        let rows = top_scorers(&[raw], ScorerOptions::default());
        let players: Vec<(&str, u32)> = rows.iter().map(|r| (r.player.as_str(), r.goals)).collect();
        assert_eq!(players, vec![("Ann", 1)]);
    }

    #[test]
    fn escaped_goal_name_matches_penalty_name() {
        let raw = RawMatch {
            home_goals: EventField::text(r"['10|Goal|Ann\xa0Lee']"),
            home_penalty_goals: EventField::text("Ann\u{a0}Lee (P)·55"),
            ..RawMatch::new(2019, "France", "H", "A", 2, 0)
        };
        let rows = top_scorers(&[raw], ScorerOptions::default());
        assert_eq!(
            rows,
            vec![ScorerRow {
                position: 1,
                player: "Ann\u{a0}Lee".to_string(),
                team: "H".to_string(),
                goals: 2,
            }]
        );
    }

    #[test]
    fn limit_zero_returns_nothing() {
        let matches = [with_goals(&["Bo"], &[])];
        let options = ScorerOptions {
            limit: 0,
            ..ScorerOptions::default()
        };
        assert!(top_scorers(&matches, options).is_empty());
    }
}

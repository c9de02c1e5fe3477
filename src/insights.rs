//! Cross-edition views built on top of the per-edition summary table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::summary::SummaryRow;
use crate::table::{Cell, TableRow};

pub const DOMINANCE_MIN_GAMES: u32 = 10;
pub const CONSISTENCY_MIN_TOURNAMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalsTrendRow {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "GF Avg")]
    pub goals_for_avg: f64,
    #[serde(rename = "GA Avg")]
    pub goals_against_avg: f64,
    #[serde(rename = "Total Goals Avg")]
    pub total_goals_avg: f64,
}

impl TableRow for GoalsTrendRow {
    const COLUMNS: &'static [&'static str] = &["Year", "GF Avg", "GA Avg", "Total Goals Avg"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.year.into(),
            self.goals_for_avg.into(),
            self.goals_against_avg.into(),
            self.total_goals_avg.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecordRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "GP")]
    pub games_played: u32,
    #[serde(rename = "W")]
    pub wins: u32,
    #[serde(rename = "Win Rate")]
    pub win_rate: f64,
    #[serde(rename = "GD")]
    pub goal_difference: i64,
}

impl TableRow for TeamRecordRow {
    const COLUMNS: &'static [&'static str] = &["Team", "GP", "W", "Win Rate", "GD"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team.as_str().into(),
            self.games_played.into(),
            self.wins.into(),
            self.win_rate.into(),
            self.goal_difference.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Avg Win Rate")]
    pub avg_win_rate: f64,
    #[serde(rename = "Std Win Rate")]
    pub std_win_rate: f64,
    #[serde(rename = "Tournaments")]
    pub tournaments: usize,
}

impl TableRow for ConsistencyRow {
    const COLUMNS: &'static [&'static str] = &["Team", "Avg Win Rate", "Std Win Rate", "Tournaments"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team.as_str().into(),
            self.avg_win_rate.into(),
            self.std_win_rate.into(),
            self.tournaments.into(),
        ]
    }
}

/// Mean goals for/against per game across the teams of each year.
pub fn goals_trend(summary: &[SummaryRow]) -> Vec<GoalsTrendRow> {
    let mut by_year: BTreeMap<u16, (f64, f64, usize)> = BTreeMap::new();
    for row in summary {
        let entry = by_year.entry(row.year).or_default();
        entry.0 += row.goals_for_avg;
        entry.1 += row.goals_against_avg;
        entry.2 += 1;
    }
    by_year
        .into_iter()
        .map(|(year, (gf, ga, teams))| {
            let goals_for_avg = gf / teams as f64;
            let goals_against_avg = ga / teams as f64;
            GoalsTrendRow {
                year,
                goals_for_avg,
                goals_against_avg,
                total_goals_avg: goals_for_avg + goals_against_avg,
            }
        })
        .collect()
}

/// All-time record per team, most wins first. Win rate is a percentage rounded to 2 places.
pub fn team_records(summary: &[SummaryRow]) -> Vec<TeamRecordRow> {
    let mut by_team: BTreeMap<&str, (u32, u32, u32, u32)> = BTreeMap::new();
    for row in summary {
        let entry = by_team.entry(row.team.as_str()).or_default();
        entry.0 += row.games_played;
        entry.1 += row.wins;
        entry.2 += row.goals_for;
        entry.3 += row.goals_against;
    }
    let mut rows: Vec<TeamRecordRow> = by_team
        .into_iter()
        .map(|(team, (games_played, wins, gf, ga))| TeamRecordRow {
            team: team.to_string(),
            games_played,
            wins,
            win_rate: win_rate_pct(wins, games_played),
            goal_difference: i64::from(gf) - i64::from(ga),
        })
        .collect();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}

pub fn dominant_teams(records: &[TeamRecordRow], min_games: u32) -> Vec<TeamRecordRow> {
    let mut rows = qualified(records, min_games);
    rows.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    rows
}

pub fn struggling_teams(records: &[TeamRecordRow], min_games: u32) -> Vec<TeamRecordRow> {
    let mut rows = qualified(records, min_games);
    rows.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
    rows
}

fn qualified(records: &[TeamRecordRow], min_games: u32) -> Vec<TeamRecordRow> {
    records
        .iter()
        .filter(|r| r.games_played >= min_games)
        .cloned()
        .collect()
}

/// Spread of a team's per-year win rate, steadiest teams first.
///
/// Standard deviation is the sample deviation over the years a team played.
/// Teams with fewer than `min_tournaments` years are left out.
pub fn consistency(summary: &[SummaryRow], min_tournaments: usize) -> Vec<ConsistencyRow> {
    let mut per_year: BTreeMap<(&str, u16), (u32, u32)> = BTreeMap::new();
    for row in summary {
        let entry = per_year.entry((row.team.as_str(), row.year)).or_default();
        entry.0 += row.wins;
        entry.1 += row.games_played;
    }

    let mut rates: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ((team, _), (wins, games)) in per_year {
        rates.entry(team).or_default().push(win_rate_pct(wins, games));
    }

    let mut rows: Vec<ConsistencyRow> = rates
        .into_iter()
        .filter(|(_, values)| values.len() >= min_tournaments.max(2))
        .map(|(team, values)| {
            let (mean, std) = mean_and_sample_std(&values);
            ConsistencyRow {
                team: team.to_string(),
                avg_win_rate: mean,
                std_win_rate: std,
                tournaments: values.len(),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.std_win_rate.total_cmp(&b.std_win_rate));
    rows
}

/// The `n` least steady teams of a [`consistency`] table, kept in its order.
pub fn inconsistent_teams(consistency: &[ConsistencyRow], n: usize) -> &[ConsistencyRow] {
    &consistency[consistency.len().saturating_sub(n)..]
}

fn win_rate_pct(wins: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    round2(f64::from(wins) / f64::from(games) * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean_and_sample_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

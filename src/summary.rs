use std::collections::HashMap;

use serde::Serialize;

use crate::event_codec;
use crate::raw_match::{RawMatch, Side};
use crate::table::{Cell, TableRow};
use crate::team_matches::{TeamMatchRecord, normalize};

/// Per-edition team line: totals, per-game means and assisted-goal rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "GP")]
    pub games_played: u32,
    #[serde(rename = "GF")]
    pub goals_for: u32,
    #[serde(rename = "GF Avg")]
    pub goals_for_avg: f64,
    #[serde(rename = "GA")]
    pub goals_against: u32,
    #[serde(rename = "GA Avg")]
    pub goals_against_avg: f64,
    #[serde(rename = "W")]
    pub wins: u32,
    #[serde(rename = "D")]
    pub draws: u32,
    #[serde(rename = "L")]
    pub losses: u32,
    #[serde(rename = "Assist Avg")]
    pub assist_avg: f64,
}

impl TableRow for SummaryRow {
    const COLUMNS: &'static [&'static str] = &[
        "Year",
        "Host",
        "Team",
        "GP",
        "GF",
        "GF Avg",
        "GA",
        "GA Avg",
        "W",
        "D",
        "L",
        "Assist Avg",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.year.into(),
            self.host.as_str().into(),
            self.team.as_str().into(),
            self.games_played.into(),
            self.goals_for.into(),
            self.goals_for_avg.into(),
            self.goals_against.into(),
            self.goals_against_avg.into(),
            self.wins.into(),
            self.draws.into(),
            self.losses.into(),
            self.assist_avg.into(),
        ]
    }
}

type EditionTeam<'a> = (u16, &'a str, &'a str);

#[derive(Default)]
struct Totals {
    games_played: u32,
    goals_for: u32,
    goals_against: u32,
    wins: u32,
    draws: u32,
    losses: u32,
}

pub fn summary(matches: &[RawMatch]) -> Vec<SummaryRow> {
    summary_from_records(&normalize(matches), matches)
}

/// Same as [`summary`] over an already normalized table built from `matches`.
///
/// Sorted by year ascending, then goals scored descending; other ties keep
/// first-seen order.
pub fn summary_from_records(records: &[TeamMatchRecord], matches: &[RawMatch]) -> Vec<SummaryRow> {
    let mut index: HashMap<EditionTeam<'_>, usize> = HashMap::new();
    let mut groups: Vec<(EditionTeam<'_>, Totals)> = Vec::new();

    for record in records {
        let key = (record.year, record.host.as_str(), record.team.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Totals::default()));
            groups.len() - 1
        });
        let totals = &mut groups[slot].1;
        totals.games_played += 1;
        totals.goals_for += record.goals_for;
        totals.goals_against += record.goals_against;
        totals.wins += record.win;
        totals.draws += record.draw;
        totals.losses += record.loss;
    }

    let assists = assist_totals(matches);

    let mut rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|((year, host, team), totals)| {
            let assisted = assists.get(&(year, host, team)).copied().unwrap_or(0);
            let games = f64::from(totals.games_played);
            SummaryRow {
                year,
                host: host.to_string(),
                team: team.to_string(),
                games_played: totals.games_played,
                goals_for: totals.goals_for,
                goals_for_avg: f64::from(totals.goals_for) / games,
                goals_against: totals.goals_against,
                goals_against_avg: f64::from(totals.goals_against) / games,
                wins: totals.wins,
                draws: totals.draws,
                losses: totals.losses,
                assist_avg: f64::from(assisted) / games,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.year.cmp(&b.year).then(b.goals_for.cmp(&a.goals_for)));
    rows
}

/// Assisted goals per (edition, host, team), counted from each side's goal-detail field.
fn assist_totals(matches: &[RawMatch]) -> HashMap<EditionTeam<'_>, u32> {
    let mut totals = HashMap::new();
    for side in Side::BOTH {
        for raw in matches {
            let view = raw.side(side);
            let assisted = event_codec::decode_list_field(view.goal_details)
                .iter()
                .filter(|event| event_codec::has_assist(event))
                .count() as u32;
            *totals
                .entry((raw.year, raw.host.as_str(), view.team))
                .or_insert(0) += assisted;
        }
    }
    totals
}

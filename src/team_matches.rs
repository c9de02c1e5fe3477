use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::event_codec;
use crate::raw_match::{RawMatch, Side};

/// One team's view of one match. Every match yields a home and an away record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMatchRecord {
    pub year: u16,
    pub host: String,
    pub attendance: Option<u64>,
    pub team: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
    pub points: u32,
    pub fair_play: i64,
}

impl TeamMatchRecord {
    fn from_side(raw: &RawMatch, side: Side) -> Self {
        let view = raw.side(side);
        let yellow_cards = event_codec::count(view.yellow_cards);
        let red_cards = event_codec::count(view.red_cards);
        let (win, draw, loss) = match view.goals_for.cmp(&view.goals_against) {
            Ordering::Greater => (1, 0, 0),
            Ordering::Equal => (0, 1, 0),
            Ordering::Less => (0, 0, 1),
        };
        Self {
            year: raw.year,
            host: raw.host.clone(),
            attendance: raw.attendance,
            team: view.team.to_string(),
            goals_for: view.goals_for,
            goals_against: view.goals_against,
            yellow_cards,
            red_cards,
            win,
            draw,
            loss,
            points: 3 * win + draw,
            fair_play: -i64::from(yellow_cards) - 2 * i64::from(red_cards),
        }
    }
}

/// Reshape match rows into team rows, home record first then away, match by match.
pub fn normalize(matches: &[RawMatch]) -> Vec<TeamMatchRecord> {
    let records: Vec<TeamMatchRecord> = matches
        .iter()
        .flat_map(|raw| Side::BOTH.map(|side| TeamMatchRecord::from_side(raw, side)))
        .collect();
    debug!(matches = matches.len(), records = records.len(), "normalized team-match table");
    records
}

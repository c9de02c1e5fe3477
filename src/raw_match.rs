use serde::{Deserialize, Serialize};

use crate::event_codec::EventField;

/// One played match as delivered by the acquisition side, column names included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "Attendance", default)]
    pub attendance: Option<u64>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(rename = "home_yellow_card_long", default)]
    pub home_yellow_cards: EventField,
    #[serde(rename = "away_yellow_card_long", default)]
    pub away_yellow_cards: EventField,
    #[serde(rename = "home_red_card", default)]
    pub home_red_cards: EventField,
    #[serde(rename = "away_red_card", default)]
    pub away_red_cards: EventField,
    #[serde(rename = "home_goal_long", default)]
    pub home_goals: EventField,
    #[serde(rename = "away_goal_long", default)]
    pub away_goals: EventField,
    #[serde(rename = "home_penalty_goal", default)]
    pub home_penalty_goals: EventField,
    #[serde(rename = "away_penalty_goal", default)]
    pub away_penalty_goals: EventField,
}

impl RawMatch {
    pub fn new(
        year: u16,
        host: &str,
        home_team: &str,
        away_team: &str,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            year,
            host: host.to_string(),
            attendance: None,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score,
            away_score,
            home_yellow_cards: EventField::Missing,
            away_yellow_cards: EventField::Missing,
            home_red_cards: EventField::Missing,
            away_red_cards: EventField::Missing,
            home_goals: EventField::Missing,
            away_goals: EventField::Missing,
            home_penalty_goals: EventField::Missing,
            away_penalty_goals: EventField::Missing,
        }
    }

    /// The match seen from one side: "own" columns and the opponent's score.
    pub fn side(&self, side: Side) -> SideView<'_> {
        match side {
            Side::Home => SideView {
                team: &self.home_team,
                goals_for: self.home_score,
                goals_against: self.away_score,
                yellow_cards: &self.home_yellow_cards,
                red_cards: &self.home_red_cards,
                goal_details: &self.home_goals,
                penalty_goals: &self.home_penalty_goals,
            },
            Side::Away => SideView {
                team: &self.away_team,
                goals_for: self.away_score,
                goals_against: self.home_score,
                yellow_cards: &self.away_yellow_cards,
                red_cards: &self.away_red_cards,
                goal_details: &self.away_goals,
                penalty_goals: &self.away_penalty_goals,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];
}

#[derive(Debug, Clone, Copy)]
pub struct SideView<'a> {
    pub team: &'a str,
    pub goals_for: u32,
    pub goals_against: u32,
    pub yellow_cards: &'a EventField,
    pub red_cards: &'a EventField,
    pub goal_details: &'a EventField,
    pub penalty_goals: &'a EventField,
}

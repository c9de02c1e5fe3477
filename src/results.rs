use once_cell::sync::OnceCell;
use tracing::debug;

use crate::raw_match::RawMatch;
use crate::scorers::{self, ScorerOptions, ScorerRow};
use crate::standings::{self, StandingsRow};
use crate::summary::{self, SummaryRow};
use crate::team_matches::{self, TeamMatchRecord};

/// Match rows plus the team-match table derived from them.
///
/// The normalized table is built on first use and never modified afterwards.
/// Different input means a different `ResultsTable`. Every view is recomputed
/// from these two tables on each call.
#[derive(Debug, Default)]
pub struct ResultsTable {
    matches: Vec<RawMatch>,
    records: OnceCell<Vec<TeamMatchRecord>>,
}

impl ResultsTable {
    pub fn new(matches: Vec<RawMatch>) -> Self {
        Self {
            matches,
            records: OnceCell::new(),
        }
    }

    pub fn for_edition(&self, year: u16) -> Self {
        let matches: Vec<RawMatch> = self
            .matches
            .iter()
            .filter(|m| m.year == year)
            .cloned()
            .collect();
        debug!(year, matches = matches.len(), "filtered edition");
        Self::new(matches)
    }

    pub fn matches(&self) -> &[RawMatch] {
        &self.matches
    }

    pub fn editions(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self.matches.iter().map(|m| m.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn team_matches(&self) -> &[TeamMatchRecord] {
        self.records
            .get_or_init(|| team_matches::normalize(&self.matches))
    }

    pub fn standings(&self) -> Vec<StandingsRow> {
        standings::standings(self.team_matches())
    }

    pub fn top_scorers(&self, options: ScorerOptions) -> Vec<ScorerRow> {
        scorers::top_scorers(&self.matches, options)
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        summary::summary_from_records(self.team_matches(), &self.matches)
    }
}

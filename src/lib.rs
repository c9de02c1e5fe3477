pub mod config;
pub mod dataset;
pub mod event_codec;
pub mod export;
pub mod http_client;
pub mod insights;
pub mod raw_match;
pub mod results;
pub mod scorers;
pub mod standings;
pub mod summary;
pub mod table;
pub mod team_matches;

pub use raw_match::{RawMatch, Side};
pub use results::ResultsTable;
pub use scorers::{ScorerOptions, ScorerRow, top_scorers};
pub use standings::{StandingsRow, standings};
pub use summary::{SummaryRow, summary};
pub use team_matches::{TeamMatchRecord, normalize};

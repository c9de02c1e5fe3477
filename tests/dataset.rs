use std::path::PathBuf;

use wc_results::dataset::{load_matches, parse_matches_csv, parse_matches_json};
use wc_results::event_codec::EventField;
use wc_results::{ResultsTable, ScorerOptions};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn loads_csv_with_missing_cells_and_extra_columns() {
    let matches = load_matches(&fixture_path("matches_mixed.csv")).expect("csv fixture should load");
    assert_eq!(matches.len(), 3);

    let first = &matches[0];
    assert_eq!(first.year, 1991);
    assert_eq!(first.attendance, Some(65000));
    assert_eq!((first.home_score, first.away_score), (0, 4));
    assert!(first.home_yellow_cards.is_missing());
    assert_eq!(first.home_goals, EventField::text("[]"));

    assert_eq!(matches[2].attendance, None);
    assert_eq!(matches[2].host, "Sweden");
}

#[test]
fn csv_tables_match_expected_results() {
    let matches = load_matches(&fixture_path("matches_mixed.csv")).expect("csv fixture should load");
    let table = ResultsTable::new(matches);

    let standings = table.standings();
    let teams: Vec<&str> = standings.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, vec!["Norway", "China PR", "New Zealand", "Nigeria"]);
    assert_eq!(standings[0].points, 9);
    assert_eq!(standings[0].goal_difference, 16);
    assert_eq!(standings[0].fair_play, -2);
    assert_eq!(standings[3].fair_play, -2);

    let scorers = table.top_scorers(ScorerOptions::default());
    let top: Vec<(u32, &str, u32)> = scorers
        .iter()
        .map(|r| (r.position, r.player.as_str(), r.goals))
        .collect();
    assert_eq!(
        top,
        vec![
            (1, "Linda Medalen", 5),
            (2, "Tone Haugen", 2),
            (3, "Birthe Hegstad", 1),
            (3, "Gro Espeseth", 1),
            (3, "Hege Riise", 1),
        ]
    );

    let summary = table.summary();
    let keys: Vec<(u16, &str)> = summary.iter().map(|r| (r.year, r.team.as_str())).collect();
    assert_eq!(
        keys,
        vec![
            (1991, "Norway"),
            (1991, "China PR"),
            (1991, "New Zealand"),
            (1995, "Norway"),
            (1995, "Nigeria"),
        ]
    );
    assert_eq!(summary[0].assist_avg, 0.5);
    assert_eq!(summary[3].assist_avg, 1.0);
}

#[test]
fn edition_filter_narrows_tables() {
    let matches = load_matches(&fixture_path("matches_mixed.csv")).expect("csv fixture should load");
    let table = ResultsTable::new(matches).for_edition(1995);
    assert_eq!(table.matches().len(), 1);
    assert_eq!(table.standings().len(), 2);
}

#[test]
fn missing_score_is_rejected_with_row_context() {
    let err = load_matches(&fixture_path("matches_missing_score.csv")).expect_err("missing score must fail");
    let message = format!("{err:#}");
    assert!(
        message.contains("match row 1 (Germany vs Canada, 2003) missing home_score"),
        "unexpected error: {message}"
    );
}

#[test]
fn wrong_event_shape_is_fatal() {
    assert!(load_matches(&fixture_path("matches_bad_shape.json")).is_err());
}

#[test]
fn json_native_lists_and_nulls() {
    let raw = r#"[{"Year": 1999, "Host": "USA", "home_team": "USA", "away_team": "China PR",
        "home_score": 0, "away_score": 0, "home_yellow_card_long": ["1|Yellow|A", "2|Yellow|B"]}]"#;
    let matches = parse_matches_json(raw).expect("json should parse");
    assert_eq!(matches[0].home_yellow_cards, EventField::list(["1|Yellow|A", "2|Yellow|B"]));
    assert!(matches[0].away_goals.is_missing());
    assert_eq!(ResultsTable::new(matches).standings()[0].fair_play, -2);
}

#[test]
fn empty_inputs_yield_no_matches() {
    assert!(parse_matches_csv("").expect("empty csv is fine").is_empty());
    assert!(parse_matches_json("[]").expect("empty json is fine").is_empty());
}

#[test]
fn json_accepts_integral_float_numbers() {
    let raw = r#"[
        {"Year": 2015.0, "Host": "Canada", "Attendance": 42137.0, "home_team": "Canada",
         "away_team": "China PR", "home_score": 1.0, "away_score": 0}
    ]"#;
    let matches = parse_matches_json(raw).expect("integral floats should load");
    assert_eq!(matches[0].year, 2015);
    assert_eq!(matches[0].attendance, Some(42137));
    assert_eq!((matches[0].home_score, matches[0].away_score), (1, 0));

    let fractional = raw.replace("42137.0", "42137.5");
    assert!(parse_matches_json(&fractional).is_err());
}

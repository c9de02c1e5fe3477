use std::fs;
use std::mem::take;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Number, Value};
use tracing::info;

use crate::http_client;
use crate::raw_match::RawMatch;

const SCORE_COLUMNS: [&str; 2] = ["home_score", "away_score"];
const NUMERIC_COLUMNS: [&str; 4] = ["Year", "Attendance", "home_score", "away_score"];

/// Load match rows from disk. `.json` files hold an array of records, anything else is read as CSV.
pub fn load_matches(path: &Path) -> Result<Vec<RawMatch>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read match file {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let matches = if is_json {
        parse_matches_json(&raw)
    } else {
        parse_matches_csv(&raw)
    }
    .with_context(|| format!("parse match file {}", path.display()))?;
    info!(path = %path.display(), matches = matches.len(), "loaded match table");
    Ok(matches)
}

pub fn fetch_matches_csv(url: &str) -> Result<Vec<RawMatch>> {
    let raw = http_client::fetch_text(url)?;
    let matches = parse_matches_csv(&raw).with_context(|| format!("parse match csv from {url}"))?;
    info!(url, matches = matches.len(), "fetched match table");
    Ok(matches)
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<RawMatch>> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(raw).context("match json must be an array of objects")?;
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| match_from_record(idx, record))
        .collect()
}

/// CSV with a header row naming the match columns. Empty cells are missing values.
pub fn parse_matches_csv(raw: &str) -> Result<Vec<RawMatch>> {
    let mut rows = parse_rows(raw, ',').into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header
        .into_iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    rows.enumerate()
        .map(|(idx, row)| {
            if row.len() > header.len() {
                bail!(
                    "match row {idx} has {} cells but the header has {}",
                    row.len(),
                    header.len()
                );
            }
            let mut record = Map::new();
            for (column, cell) in header.iter().zip(row) {
                record.insert(column.clone(), csv_value(column, cell));
            }
            match_from_record(idx, record)
        })
        .collect()
}

fn match_from_record(idx: usize, mut record: Map<String, Value>) -> Result<RawMatch> {
    for column in SCORE_COLUMNS {
        if record.get(column).is_none_or(Value::is_null) {
            return Err(anyhow!(
                "match row {idx} ({} vs {}, {}) missing {column}",
                describe(&record, "home_team"),
                describe(&record, "away_team"),
                describe(&record, "Year"),
            ));
        }
    }
    for column in NUMERIC_COLUMNS {
        if let Some(Value::Number(n)) = record.get_mut(column)
            && n.as_u64().is_none()
            && let Some(whole) = n.as_f64().and_then(integral)
        {
            *n = whole;
        }
    }
    serde_json::from_value(Value::Object(record)).with_context(|| format!("match row {idx}"))
}

fn describe(record: &Map<String, Value>, column: &str) -> String {
    match record.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}

fn csv_value(column: &str, cell: String) -> Value {
    if cell.trim().is_empty() {
        return Value::Null;
    }
    if NUMERIC_COLUMNS.contains(&column)
        && let Some(n) = numeric_cell(&cell)
    {
        return Value::Number(n);
    }
    Value::String(cell)
}

/// Integer text, or float text with no fractional part (`"3.0"`), as written by dataframe exports.
fn numeric_cell(cell: &str) -> Option<Number> {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(Number::from(n));
    }
    integral(trimmed.parse::<f64>().ok()?)
}

fn integral(f: f64) -> Option<Number> {
    let whole = f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64;
    whole.then(|| Number::from(f as u64))
}

/// Minimal CSV parser: quoted fields with `""` escapes, CRLF tolerant, blank lines skipped.
fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                if row.len() == 1 && row[0].is_empty() {
                    row.clear();
                } else {
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

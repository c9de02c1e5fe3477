use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use crate::scorers::{DEFAULT_TOP_N, ScorerOptions};

/// Settings for one report run. Environment first, command-line flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub matches_path: Option<PathBuf>,
    pub matches_url: Option<String>,
    pub edition: Option<u16>,
    pub top_n: usize,
    pub include_penalties: bool,
    pub export_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            matches_path: None,
            matches_url: None,
            edition: None,
            top_n: DEFAULT_TOP_N,
            include_penalties: true,
            export_path: None,
        }
    }
}

pub enum MatchSource<'a> {
    File(&'a PathBuf),
    Url(&'a str),
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from any key lookup. Unset, blank or unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };
        let defaults = Self::default();
        Self {
            matches_path: get("WC_MATCHES_PATH").map(PathBuf::from),
            matches_url: get("WC_MATCHES_URL"),
            edition: get("WC_EDITION").and_then(|val| val.parse::<u16>().ok()),
            top_n: get("WC_TOP_N")
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(defaults.top_n)
                .max(1),
            include_penalties: get("WC_INCLUDE_PENALTIES")
                .and_then(|val| parse_flag(&val))
                .unwrap_or(defaults.include_penalties),
            export_path: get("WC_EXPORT_PATH").map(PathBuf::from),
        }
    }

    /// Apply `--flag value` / `--flag=value` arguments (program name excluded).
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut idx = 0;
        while idx < args.len() {
            let arg = args[idx].as_str();
            idx += 1;
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg, None),
            };
            if flag == "--no-penalties" {
                self.include_penalties = false;
                continue;
            }
            let value = match inline {
                Some(value) => value,
                None => {
                    let next = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("missing value for {flag}"))?;
                    idx += 1;
                    next.clone()
                }
            };
            match flag {
                "--matches" => self.matches_path = Some(PathBuf::from(value)),
                "--url" => self.matches_url = Some(value),
                "--edition" => {
                    let year = value
                        .trim()
                        .parse::<u16>()
                        .with_context(|| format!("invalid --edition {value:?}"))?;
                    self.edition = Some(year);
                }
                "--top" => {
                    let top = value
                        .trim()
                        .parse::<usize>()
                        .with_context(|| format!("invalid --top {value:?}"))?;
                    self.top_n = top.max(1);
                }
                "--export" => self.export_path = Some(PathBuf::from(value)),
                other => bail!("unknown argument {other}"),
            }
        }
        Ok(self)
    }

    pub fn scorer_options(&self) -> ScorerOptions {
        ScorerOptions {
            include_penalties: self.include_penalties,
            limit: self.top_n,
        }
    }

    /// A local file wins over a URL when both are set.
    pub fn source(&self) -> Option<MatchSource<'_>> {
        if let Some(path) = self.matches_path.as_ref() {
            return Some(MatchSource::File(path));
        }
        self.matches_url.as_deref().map(MatchSource::Url)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn env_defaults_when_unset_or_invalid() {
        let cfg = ReportConfig::from_lookup(lookup(&[
            ("WC_TOP_N", "zero"),
            ("WC_INCLUDE_PENALTIES", "maybe"),
            ("WC_EDITION", " "),
        ]));
        assert_eq!(cfg, ReportConfig::default());
    }

    #[test]
    fn env_values_are_read() {
        let cfg = ReportConfig::from_lookup(lookup(&[
            ("WC_MATCHES_PATH", "data/matches.csv"),
            ("WC_EDITION", "2023"),
            ("WC_TOP_N", "0"),
            ("WC_INCLUDE_PENALTIES", "no"),
        ]));
        assert_eq!(cfg.matches_path, Some(PathBuf::from("data/matches.csv")));
        assert_eq!(cfg.edition, Some(2023));
        assert_eq!(cfg.top_n, 1);
        assert!(!cfg.include_penalties);
    }

    #[test]
    fn args_override_env() {
        let cfg = ReportConfig::from_lookup(lookup(&[("WC_EDITION", "1991")]))
            .apply_args(&args(&["--edition=2019", "--top", "5", "--no-penalties", "--export", "out.xlsx"]))
            .expect("valid args");
        assert_eq!(cfg.edition, Some(2019));
        assert_eq!(cfg.scorer_options(), ScorerOptions { include_penalties: false, limit: 5 });
        assert_eq!(cfg.export_path, Some(PathBuf::from("out.xlsx")));
    }

    #[test]
    fn bad_args_are_errors() {
        assert!(ReportConfig::default().apply_args(&args(&["--top"])).is_err());
        assert!(ReportConfig::default().apply_args(&args(&["--edition", "soon"])).is_err());
        assert!(ReportConfig::default().apply_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn file_source_wins_over_url() {
        let cfg = ReportConfig {
            matches_path: Some(PathBuf::from("m.json")),
            matches_url: Some("https://example.org/m.csv".to_string()),
            ..ReportConfig::default()
        };
        assert!(matches!(cfg.source(), Some(MatchSource::File(_))));
    }
}

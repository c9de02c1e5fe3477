use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use wc_results::config::{MatchSource, ReportConfig};
use wc_results::export::{ReportTables, export_workbook};
use wc_results::table::{TableRow, render_text};
use wc_results::{ResultsTable, dataset, insights};

const TEAM_LIST_LEN: usize = 10;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = ReportConfig::from_env().apply_args(&args)?;

    let matches = match cfg.source() {
        Some(MatchSource::File(path)) => dataset::load_matches(path)?,
        Some(MatchSource::Url(url)) => dataset::fetch_matches_csv(url)?,
        None => {
            return Err(anyhow!(
                "no match data: pass --matches <file> or --url <csv url> (or set WC_MATCHES_PATH / WC_MATCHES_URL)"
            ));
        }
    };

    let all = ResultsTable::new(matches);
    let (table, scope) = match cfg.edition {
        Some(year) => (all.for_edition(year), year.to_string()),
        None => {
            let scope = edition_span(&all);
            (all, scope)
        }
    };

    let scorer_options = cfg.scorer_options();
    let ((standings, scorers), summary) = rayon::join(
        || rayon::join(|| table.standings(), || table.top_scorers(scorer_options)),
        || table.summary(),
    );

    print_section(&format!("Standings {scope}"), &standings);
    print_section(&format!("Top scorers {scope}"), &scorers);
    print_section(&format!("Summary {scope}"), &summary);

    let records = insights::team_records(&summary);
    print_section("Average goals trend", &insights::goals_trend(&summary));
    print_section("Most wins", head(&records));
    print_section(
        &format!("Most dominant teams (min {} games)", insights::DOMINANCE_MIN_GAMES),
        head(&insights::dominant_teams(&records, insights::DOMINANCE_MIN_GAMES)),
    );
    print_section(
        &format!("Worst performing teams (min {} games)", insights::DOMINANCE_MIN_GAMES),
        head(&insights::struggling_teams(&records, insights::DOMINANCE_MIN_GAMES)),
    );
    let consistency = insights::consistency(&summary, insights::CONSISTENCY_MIN_TOURNAMENTS);
    print_section(
        &format!(
            "Most consistent teams (min {} tournaments)",
            insights::CONSISTENCY_MIN_TOURNAMENTS
        ),
        head(&consistency),
    );
    print_section(
        &format!(
            "Most inconsistent teams (min {} tournaments)",
            insights::CONSISTENCY_MIN_TOURNAMENTS
        ),
        insights::inconsistent_teams(&consistency, TEAM_LIST_LEN),
    );

    if let Some(path) = cfg.export_path.as_ref() {
        let report = export_workbook(
            path,
            &ReportTables {
                scope: &scope,
                standings: &standings,
                scorers: &scorers,
                summary: &summary,
            },
        )
        .context("export report workbook")?;
        println!(
            "Exported {} standings, {} scorers, {} summary rows to {}",
            report.standings,
            report.scorers,
            report.summary,
            path.display()
        );
    }

    Ok(())
}

fn edition_span(table: &ResultsTable) -> String {
    let editions = table.editions();
    match (editions.first(), editions.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "no editions".to_string(),
    }
}

fn head<R>(rows: &[R]) -> &[R] {
    &rows[..rows.len().min(TEAM_LIST_LEN)]
}

fn print_section<R: TableRow>(title: &str, rows: &[R]) {
    println!("\n{title}");
    if rows.is_empty() {
        println!("  (no rows)");
        return;
    }
    print!("{}", render_text(rows));
}

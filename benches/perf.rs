use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use wc_results::event_codec::{self, EventField};
use wc_results::{RawMatch, ResultsTable, ScorerOptions, normalize, standings, summary, top_scorers};

const TEAMS: [&str; 12] = [
    "Australia", "Brazil", "Canada", "China PR", "England", "France", "Germany", "Japan",
    "Netherlands", "Norway", "Spain", "USA",
];

fn sample_matches(count: usize) -> Vec<RawMatch> {
    (0..count)
        .map(|idx| {
            let home = TEAMS[idx % TEAMS.len()];
            let away = TEAMS[(idx * 7 + 1) % TEAMS.len()];
            let home_score = (idx % 4) as u32;
            let away_score = (idx % 3) as u32;
            let goals = |side: &str, n: u32| {
                let events: Vec<String> = (0..n)
                    .map(|g| format!("'{}|Goal|{side} Player {}|Assist: {side} Mid'", 10 + g * 17, g % 3))
                    .collect();
                EventField::text(format!("[{}]", events.join(", ")))
            };
            RawMatch {
                home_goals: goals(home, home_score),
                away_goals: goals(away, away_score),
                home_yellow_cards: EventField::list(["30|Yellow Card|Sample Player"]),
                away_penalty_goals: if idx % 5 == 0 {
                    EventField::text(format!("{away} Player 0 (P)·77"))
                } else {
                    EventField::Missing
                },
                ..RawMatch::new(1991 + 4 * (idx % 9) as u16, "Host", home, away, home_score, away_score)
            }
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let field = EventField::text(
        "['12|Goal|Ada Stone|Assist: Dana Reed', '45+1|Goal|Eve Lang', '78|Goal|Fay Moss|Assist: Ada Stone']",
    );
    c.bench_function("decode_list_field", |b| {
        b.iter(|| {
            let events = event_codec::decode_list_field(black_box(&field));
            black_box(events.len());
        })
    });
}

fn bench_aggregates(c: &mut Criterion) {
    let matches = sample_matches(1_000);

    c.bench_function("normalize_and_standings", |b| {
        b.iter(|| {
            let rows = standings(&normalize(black_box(&matches)));
            black_box(rows.len());
        })
    });

    c.bench_function("top_scorers", |b| {
        b.iter(|| {
            let rows = top_scorers(black_box(&matches), ScorerOptions::default());
            black_box(rows.len());
        })
    });

    c.bench_function("summary", |b| {
        b.iter(|| {
            let rows = summary(black_box(&matches));
            black_box(rows.len());
        })
    });

    let table = ResultsTable::new(matches.clone());
    c.bench_function("memoized_summary", |b| {
        b.iter(|| {
            let rows = table.summary();
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_codec, bench_aggregates);
criterion_main!(benches);

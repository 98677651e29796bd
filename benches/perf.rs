use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fixturedesk::odds_board::aggregate;
use fixturedesk::odds_fetch::parse_odds_json;
use fixturedesk::provider_fetch::{parse_fixture_json, parse_standings_json, parse_team_stats_json};
use fixturedesk::standings::{TableView, project};
use fixturedesk::taxonomy::Taxonomy;
use fixturedesk::time_buckets;

fn bench_fixture_parse(c: &mut Criterion) {
    c.bench_function("fixture_parse", |b| {
        b.iter(|| {
            let fixture = parse_fixture_json(black_box(FIXTURE_JSON)).unwrap();
            black_box(fixture.scores.len());
        })
    });
}

fn bench_standings_parse(c: &mut Criterion) {
    c.bench_function("standings_parse", |b| {
        b.iter(|| {
            let rows = parse_standings_json(black_box(STANDINGS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_standings_home_projection(c: &mut Criterion) {
    let rows = parse_standings_json(STANDINGS_JSON).unwrap();
    let taxonomy = Taxonomy::default();
    c.bench_function("standings_home_projection", |b| {
        b.iter(|| {
            let table = project(black_box(&rows), TableView::Home, &taxonomy);
            black_box(table.len());
        })
    });
}

fn bench_odds_aggregate(c: &mut Criterion) {
    let quotes = parse_odds_json(ODDS_JSON).unwrap();
    let taxonomy = Taxonomy::default();
    c.bench_function("odds_aggregate", |b| {
        b.iter(|| {
            let markets = aggregate(black_box(&quotes), None, &taxonomy);
            black_box(markets.len());
        })
    });
}

fn bench_bucket_extract(c: &mut Criterion) {
    let details = parse_team_stats_json(TEAM_STATS_JSON).unwrap();
    let taxonomy = Taxonomy::default();
    c.bench_function("bucket_extract", |b| {
        b.iter(|| {
            let buckets = time_buckets::extract(black_box(&details), taxonomy.scoring_minutes);
            black_box(buckets.map(|bk| bk.total()));
        })
    });
}

criterion_group!(
    perf,
    bench_fixture_parse,
    bench_standings_parse,
    bench_standings_home_projection,
    bench_odds_aggregate,
    bench_bucket_extract
);
criterion_main!(perf);

static FIXTURE_JSON: &str = include_str!("../tests/fixtures/fixture_detail.json");
static STANDINGS_JSON: &str = include_str!("../tests/fixtures/standings.json");
static ODDS_JSON: &str = include_str!("../tests/fixtures/odds.json");
static TEAM_STATS_JSON: &str = include_str!("../tests/fixtures/team_stats.json");

use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};

use fixturedesk::corners;
use fixturedesk::form::{self, DEFAULT_FORM_LIMIT};
use fixturedesk::model::{FixtureSummary, Participant, Side, StatDetail};
use fixturedesk::odds_board;
use fixturedesk::odds_fetch;
use fixturedesk::provider_fetch::{self, ProviderConfig};
use fixturedesk::score::resolve_goals;
use fixturedesk::standings::{self, TableView, Zone};
use fixturedesk::taxonomy::Taxonomy;
use fixturedesk::time_buckets;

const BAR_WIDTH: u32 = 20;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let fixture_id = env::args()
        .nth(1)
        .context("usage: fixturedesk <fixture-id>")?
        .parse::<u64>()
        .context("fixture id must be numeric")?;

    let cfg = ProviderConfig::from_env();
    let taxonomy = Taxonomy::default();

    let fixture = provider_fetch::fetch_fixture(&cfg, fixture_id)?;
    let home = fixture
        .participant(Side::Home)
        .context("fixture has no home participant")?
        .clone();
    let away = fixture
        .participant(Side::Away)
        .context("fixture has no away participant")?
        .clone();

    println!("{} vs {}", home.name, away.name);
    if let Some(kickoff) = fixture.starting_at {
        println!("Kickoff: {}", kickoff.format("%Y-%m-%d %H:%M UTC"));
    }
    println!(
        "Score:   {} - {}  [{}]",
        fmt_goals(resolve_goals(&fixture.scores, Side::Home)),
        fmt_goals(resolve_goals(&fixture.scores, Side::Away)),
        fixture.state_short.as_deref().unwrap_or("?")
    );

    let (home_payload, away_payload) = rayon::join(
        || team_payload(&cfg, home.id),
        || team_payload(&cfg, away.id),
    );

    print_form(&home.name, &home_payload.fixtures, home.id);
    print_form(&away.name, &away_payload.fixtures, away.id);
    print_scoring_minutes(
        &home.name,
        &away.name,
        &home_payload.stats,
        &away_payload.stats,
        &taxonomy,
    );
    print_corners(&home, &away, &home_payload, &away_payload, &taxonomy);
    print_odds(&cfg, fixture_id, &taxonomy);

    if let Some(season_id) = opt_u64_env("SEASON_ID") {
        print_standings(&cfg, season_id, &taxonomy);
    }

    Ok(())
}

struct TeamPayload {
    fixtures: Vec<FixtureSummary>,
    stats: Vec<StatDetail>,
}

fn team_payload(cfg: &ProviderConfig, team_id: u64) -> TeamPayload {
    let fixtures = provider_fetch::fetch_team_fixtures(cfg, team_id).unwrap_or_else(|err| {
        eprintln!("[WARN] team {team_id} fixtures: {err}");
        Vec::new()
    });
    let stats = provider_fetch::fetch_team_stats(cfg, team_id).unwrap_or_else(|err| {
        eprintln!("[WARN] team {team_id} statistics: {err}");
        Vec::new()
    });
    TeamPayload { fixtures, stats }
}

fn print_form(name: &str, fixtures: &[FixtureSummary], team_id: u64) {
    let recent = form::recent_form(fixtures, team_id, DEFAULT_FORM_LIMIT);
    if recent.is_empty() {
        println!("\nForm {name}: no data available");
        return;
    }
    let summary = form::summarize(&recent);
    let letters: String = recent.iter().map(|m| m.result.as_char()).collect();
    println!(
        "\nForm {name}: {letters}  ({} pts, {}:{})",
        summary.points, summary.goals_for, summary.goals_against
    );
    for m in &recent {
        println!(
            "  {} {}-{} vs {}",
            m.result.as_char(),
            m.goals_for,
            m.goals_against,
            m.opponent
        );
    }
}

fn print_scoring_minutes(
    home_name: &str,
    away_name: &str,
    home_stats: &[StatDetail],
    away_stats: &[StatDetail],
    taxonomy: &Taxonomy,
) {
    let home_buckets = time_buckets::extract(home_stats, taxonomy.scoring_minutes);
    let away_buckets = time_buckets::extract(away_stats, taxonomy.scoring_minutes);
    if home_buckets.is_none() && away_buckets.is_none() {
        return;
    }

    let scale = time_buckets::scale_max(home_buckets.as_ref(), away_buckets.as_ref());
    println!("\nGoals by period          {home_name:>12} | {away_name}");
    for (idx, key) in time_buckets::BUCKET_KEYS.iter().enumerate() {
        let left = home_buckets.map(|b| b.counts[idx]).unwrap_or(0);
        let right = away_buckets.map(|b| b.counts[idx]).unwrap_or(0);
        println!(
            "  {key:>5}  {:>2} {:<20} | {:<20} {}",
            left,
            bar(left, scale),
            bar(right, scale),
            right
        );
    }
}

fn print_corners(
    home: &Participant,
    away: &Participant,
    home_payload: &TeamPayload,
    away_payload: &TeamPayload,
    taxonomy: &Taxonomy,
) {
    let home_averages = corners::project(
        &home_payload.stats,
        venue_games(&home_payload.fixtures, home.id, Side::Home),
        venue_games(&home_payload.fixtures, home.id, Side::Away),
        taxonomy,
    );
    let away_averages = corners::project(
        &away_payload.stats,
        venue_games(&away_payload.fixtures, away.id, Side::Home),
        venue_games(&away_payload.fixtures, away.id, Side::Away),
        taxonomy,
    );

    println!("\nCorners");
    println!(
        "  {} at home: {}",
        home.name,
        fmt_average(&home_averages.home)
    );
    println!(
        "  {} away:    {}",
        away.name,
        fmt_average(&away_averages.away)
    );
    match corners::combined_expectation(&home_averages.home, &away_averages.away) {
        Some(expected) => println!("  Fixture expectation: {expected:.1}"),
        None => println!("  Fixture expectation: no data available"),
    }
}

/// Finished games this team played in the given venue context.
fn venue_games(fixtures: &[FixtureSummary], team_id: u64, side: Side) -> u32 {
    fixtures
        .iter()
        .filter(|f| f.is_full_time() && f.side_of(team_id) == Some(side))
        .count() as u32
}

fn print_odds(cfg: &ProviderConfig, fixture_id: u64, taxonomy: &Taxonomy) {
    let quotes = match odds_fetch::fetch_fixture_odds(cfg, fixture_id) {
        Ok(quotes) => quotes,
        Err(err) => {
            eprintln!("[WARN] odds: {err}");
            return;
        }
    };
    let markets = odds_board::aggregate(&quotes, None, taxonomy);
    if markets.is_empty() {
        println!("\nOdds: no data available");
        return;
    }

    let defaults = odds_board::default_bookmakers(
        &markets,
        taxonomy.market_three_way,
        primary_bookmaker_ids(),
    );
    let shown: HashSet<u64> = defaults.into_iter().collect();

    println!("\nOdds ({} markets)", markets.len());
    if let Some(group) = markets
        .iter()
        .find(|g| g.market_id == taxonomy.market_three_way)
    {
        for offer in group
            .bookmakers
            .iter()
            .filter(|b| shown.contains(&b.bookmaker_id))
        {
            let row: Vec<String> = offer
                .selections
                .iter()
                .map(|sel| format!("{} {}", sel.label, fmt_price(sel.decimal)))
                .collect();
            println!("  {:<16} {}", offer.bookmaker_name, row.join("  "));
        }
    }
}

fn primary_bookmaker_ids() -> (u64, u64) {
    let raw = env::var("PRIMARY_BOOKMAKER_IDS").unwrap_or_default();
    let mut parts = raw
        .split([',', ';', ' '])
        .filter_map(|part| part.trim().parse::<u64>().ok());
    let first = parts.next().unwrap_or(2);
    let second = parts.next().unwrap_or(5);
    (first, second)
}

fn print_standings(cfg: &ProviderConfig, season_id: u64, taxonomy: &Taxonomy) {
    let rows = match provider_fetch::fetch_standings(cfg, season_id) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("[WARN] standings: {err}");
            return;
        }
    };
    let table = standings::project(&rows, TableView::Overall, taxonomy);
    if table.is_empty() {
        println!("\nStandings: no data available");
        return;
    }

    println!("\nStandings");
    for row in &table {
        let zone = match row.zone {
            Some(Zone::Qualification) => "Q",
            Some(Zone::Relegation) => "R",
            None => " ",
        };
        let form: String = row.form.iter().map(|l| l.as_char()).collect();
        println!(
            "  {zone} {:>2}. {:<24} {:>3} pts  gd {:>4}  {form}",
            row.position,
            row.participant_name.as_deref().unwrap_or("?"),
            fmt_count(row.points),
            fmt_count(row.goal_difference),
        );
    }
}

fn bar(count: u32, scale: u32) -> String {
    "#".repeat((count * BAR_WIDTH / scale) as usize)
}

fn fmt_goals(goals: Option<u32>) -> String {
    goals.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_count(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.0}"))
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_average(venue: &corners::VenueCornerAverage) -> String {
    match venue.average {
        Some(avg) => format!("{avg:.1} per game ({} games)", venue.games),
        None => "no data available".to_string(),
    }
}

fn opt_u64_env(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

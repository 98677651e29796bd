use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use fixturedesk::corners;
use fixturedesk::form::{DEFAULT_FORM_LIMIT, recent_form, summarize};
use fixturedesk::model::{FixtureSummary, FormLetter, Participant, ScoreDescription, ScoreEntry, Side};
use fixturedesk::provider_fetch::parse_team_stats_json;
use fixturedesk::taxonomy::Taxonomy;
use fixturedesk::time_buckets::{self, BUCKET_KEYS};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn finished_fixture(id: u64, day: u32, home_goals: u32, away_goals: u32) -> FixtureSummary {
    FixtureSummary {
        id,
        league_id: Some(8),
        starting_at: Some(Utc.with_ymd_and_hms(2024, 4, day, 15, 0, 0).unwrap()),
        state_short: Some("FT".to_string()),
        participants: vec![
            Participant {
                id: 10,
                side: Side::Home,
                name: "Alpha United".to_string(),
            },
            Participant {
                id: 20,
                side: Side::Away,
                name: "Beta City".to_string(),
            },
        ],
        scores: vec![
            ScoreEntry {
                description: ScoreDescription::Current,
                type_id: None,
                side: Side::Home,
                goals: Some(home_goals),
            },
            ScoreEntry {
                description: ScoreDescription::Current,
                type_id: None,
                side: Side::Away,
                goals: Some(away_goals),
            },
        ],
    }
}

#[test]
fn form_window_keeps_only_the_newest_five() {
    let fixtures: Vec<FixtureSummary> = (1..=7)
        .map(|day| finished_fixture(day as u64, day, 1, 0))
        .collect();
    let form = recent_form(&fixtures, 10, DEFAULT_FORM_LIMIT);
    assert_eq!(form.len(), 5);
    let days: Vec<u32> = form
        .iter()
        .map(|m| {
            use chrono::Datelike;
            m.kickoff.unwrap().day()
        })
        .collect();
    assert_eq!(days, vec![7, 6, 5, 4, 3]);

    let summary = summarize(&form);
    assert_eq!(summary.wins, 5);
    assert_eq!(summary.points, 15);
}

#[test]
fn short_histories_yield_short_form() {
    let fixtures = vec![finished_fixture(1, 1, 0, 2), finished_fixture(2, 3, 1, 1)];
    let form = recent_form(&fixtures, 10, DEFAULT_FORM_LIMIT);
    assert_eq!(form.len(), 2);
    assert_eq!(form[0].result, FormLetter::Draw);
    assert_eq!(form[1].result, FormLetter::Loss);
    // Same fixtures seen from the away team invert the classification.
    let away_form = recent_form(&fixtures, 20, DEFAULT_FORM_LIMIT);
    assert_eq!(away_form[1].result, FormLetter::Win);
    assert_eq!(away_form[1].opponent, "Alpha United");
}

#[test]
fn scoring_buckets_extract_from_a_real_statistics_document() {
    let details = parse_team_stats_json(&read_fixture("team_stats.json"))
        .expect("team stats should parse");
    let taxonomy = Taxonomy::default();
    let buckets =
        time_buckets::extract(&details, taxonomy.scoring_minutes).expect("stat present");

    let counts: Vec<u32> = BUCKET_KEYS
        .iter()
        .map(|key| buckets.get(key).unwrap())
        .collect();
    assert_eq!(counts, vec![4, 3, 2, 5, 0, 6]);
    assert_eq!(buckets.total(), 20);
    assert_eq!(buckets.max(), 6);

    // The conceding distribution is simply not in this document.
    assert!(time_buckets::extract(&details, taxonomy.conceding_minutes).is_none());
    assert_eq!(
        time_buckets::scale_max(
            Some(&buckets),
            time_buckets::extract(&details, taxonomy.conceding_minutes).as_ref()
        ),
        6
    );
}

#[test]
fn corner_averages_from_a_real_statistics_document() {
    let details = parse_team_stats_json(&read_fixture("team_stats.json"))
        .expect("team stats should parse");
    let taxonomy = Taxonomy::default();

    let averages = corners::project(&details, 10, 9, &taxonomy);
    assert_eq!(averages.home.total, Some(44.0));
    assert_eq!(averages.home.average, Some(4.4));
    assert_eq!(averages.away.total, Some(36.0));
    assert_eq!(averages.away.average, Some(4.0));

    assert_eq!(
        corners::combined_expectation(&averages.home, &averages.away),
        Some(8.4)
    );

    // No games in a venue context means no average and no combined figure.
    let unplayed = corners::project(&details, 0, 9, &taxonomy);
    assert_eq!(unplayed.home.average, None);
    assert_eq!(
        corners::combined_expectation(&unplayed.home, &unplayed.away),
        None
    );
}

//! Fetch and parse fixture, team-statistic, and standings documents from the
//! sports-data provider.
//!
//! Parsing is separated from fetching so the normalization pipeline can be
//! exercised offline against recorded payloads. All `parse_*` functions are
//! lenient about optional fields and only fail on a structurally invalid
//! document (not JSON, or not the expected top-level container).

use std::env;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::{
    FixtureSummary, FormLetter, FormSlot, Participant, ScoreDescription, ScoreEntry, Side,
    StandingRow, StatDetail, StatValue, parse_kickoff,
};

const DEFAULT_API_BASE: &str = "https://api.sportmonks.com/v3/football";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base: String,
    pub token: Option<String>,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let base = env::var("PROVIDER_API_BASE")
            .ok()
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let token = env::var("PROVIDER_API_TOKEN")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());
        Self { base, token }
    }
}

pub fn fetch_fixture(cfg: &ProviderConfig, fixture_id: u64) -> Result<FixtureSummary> {
    let url = format!(
        "{}/fixtures/{fixture_id}?include=participants;scores;state",
        cfg.base
    );
    let body = fetch_json_cached(http_client()?, &url, cfg.token.as_deref())
        .context("fixture request failed")?;
    parse_fixture_json(&body)
}

pub fn fetch_team_fixtures(cfg: &ProviderConfig, team_id: u64) -> Result<Vec<FixtureSummary>> {
    let url = format!(
        "{}/fixtures?filters=teamId:{team_id}&include=participants;scores;state&per_page=50",
        cfg.base
    );
    let body = fetch_json_cached(http_client()?, &url, cfg.token.as_deref())
        .context("team fixtures request failed")?;
    parse_fixtures_page_json(&body)
}

pub fn fetch_team_stats(cfg: &ProviderConfig, team_id: u64) -> Result<Vec<StatDetail>> {
    let url = format!("{}/teams/{team_id}?include=statistics.details", cfg.base);
    let body = fetch_json_cached(http_client()?, &url, cfg.token.as_deref())
        .context("team statistics request failed")?;
    parse_team_stats_json(&body)
}

pub fn fetch_standings(cfg: &ProviderConfig, season_id: u64) -> Result<Vec<StandingRow>> {
    let url = format!(
        "{}/standings/seasons/{season_id}?include=participant;details;form",
        cfg.base
    );
    let body = fetch_json_cached(http_client()?, &url, cfg.token.as_deref())
        .context("standings request failed")?;
    parse_standings_json(&body)
}

pub fn parse_fixture_json(raw: &str) -> Result<FixtureSummary> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty fixture response"));
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixture json")?;
    let data = root.get("data").unwrap_or(&root);
    parse_fixture_value(data).context("fixture document missing id")
}

pub fn parse_fixtures_page_json(raw: &str) -> Result<Vec<FixtureSummary>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    let mut out = Vec::new();
    if let Some(list) = root.get("data").and_then(Value::as_array) {
        for item in list {
            if let Some(fixture) = parse_fixture_value(item) {
                out.push(fixture);
            }
        }
    }
    Ok(out)
}

pub fn parse_team_stats_json(raw: &str) -> Result<Vec<StatDetail>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid team statistics json")?;
    let data = root.get("data").unwrap_or(&root);

    let mut out = Vec::new();
    if let Some(blocks) = data.get("statistics").and_then(Value::as_array) {
        for block in blocks {
            collect_details(block.get("details"), &mut out);
        }
    }
    // Some responses inline the details without a statistics wrapper.
    collect_details(data.get("details"), &mut out);
    Ok(out)
}

pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid standings json")?;
    let mut out = Vec::new();
    if let Some(list) = root.get("data").and_then(Value::as_array) {
        for item in list {
            if let Some(row) = parse_standing_row(item) {
                out.push(row);
            }
        }
    }
    Ok(out)
}

fn parse_fixture_value(v: &Value) -> Option<FixtureSummary> {
    let id = v.get("id")?.as_u64()?;
    let league_id = v.get("league_id").and_then(Value::as_u64);
    let starting_at = v
        .get("starting_at")
        .and_then(Value::as_str)
        .and_then(parse_kickoff);
    let state_short = pick_str(v.get("state").unwrap_or(&Value::Null), &["short_name"])
        .or_else(|| pick_str(v, &["state_short"]));

    let mut participants = Vec::new();
    if let Some(list) = v.get("participants").and_then(Value::as_array) {
        for item in list {
            if let Some(participant) = parse_participant(item) {
                participants.push(participant);
            }
        }
    }

    let mut scores = Vec::new();
    if let Some(list) = v.get("scores").and_then(Value::as_array) {
        for item in list {
            if let Some(entry) = parse_score_entry(item, &participants) {
                scores.push(entry);
            }
        }
    }

    Some(FixtureSummary {
        id,
        league_id,
        starting_at,
        state_short,
        participants,
        scores,
    })
}

fn parse_participant(v: &Value) -> Option<Participant> {
    let id = v.get("id")?.as_u64()?;
    let side = pick_str(v.get("meta").unwrap_or(&Value::Null), &["location"])
        .or_else(|| pick_str(v, &["location", "side"]))
        .as_deref()
        .and_then(Side::from_provider)?;
    let name = pick_str(v, &["name", "short_code"]).unwrap_or_default();
    Some(Participant { id, side, name })
}

/// Score entries arrive in two layouts: the goals/participant pair nested
/// under `score`, or flattened onto the entry itself.
fn parse_score_entry(v: &Value, participants: &[Participant]) -> Option<ScoreEntry> {
    let description = pick_str(v, &["description"])
        .map(|raw| ScoreDescription::from_provider(&raw))
        .unwrap_or(ScoreDescription::Unknown);
    let inner = v.get("score").unwrap_or(&Value::Null);

    let side = pick_str(inner, &["participant"])
        .or_else(|| pick_str(v, &["participant"]))
        .as_deref()
        .and_then(Side::from_provider)
        .or_else(|| {
            let participant_id = v.get("participant_id").and_then(Value::as_u64)?;
            participants
                .iter()
                .find(|p| p.id == participant_id)
                .map(|p| p.side)
        })?;

    let goals = pick_u32(inner, &["goals"]).or_else(|| pick_u32(v, &["goals"]));
    let type_id = pick_u32(v, &["type_id"]);

    Some(ScoreEntry {
        description,
        type_id,
        side,
        goals,
    })
}

fn parse_standing_row(v: &Value) -> Option<StandingRow> {
    let participant_id = v
        .get("participant_id")
        .and_then(Value::as_u64)
        .or_else(|| {
            v.get("participant")
                .and_then(|p| p.get("id"))
                .and_then(Value::as_u64)
        })?;
    let participant_name = pick_str(v.get("participant").unwrap_or(&Value::Null), &["name"]);
    let position = pick_u32(v, &["position"]);
    let points = v.get("points").and_then(Value::as_f64);

    let mut details = Vec::new();
    collect_details(v.get("details"), &mut details);

    let mut form = Vec::new();
    if let Some(list) = v.get("form").and_then(Value::as_array) {
        for item in list {
            let Some(letter) = pick_str(item, &["form", "letter"])
                .as_deref()
                .and_then(FormLetter::from_provider)
            else {
                continue;
            };
            let sort_order = item
                .get("sort_order")
                .and_then(Value::as_f64)
                .unwrap_or(form.len() as f64);
            form.push(FormSlot { letter, sort_order });
        }
    }

    Some(StandingRow {
        participant_id,
        participant_name,
        position,
        points,
        details,
        form,
    })
}

fn collect_details(value: Option<&Value>, out: &mut Vec<StatDetail>) {
    let Some(list) = value.and_then(Value::as_array) else {
        return;
    };
    for item in list {
        let Some(type_id) = pick_u32(item, &["type_id"]) else {
            continue;
        };
        let value = item
            .get("value")
            .map(StatValue::from_json)
            .unwrap_or(StatValue::Missing);
        out.push(StatDetail { type_id, value });
    }
}

fn pick_str(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = value.get(*key).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num as u32);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.trim().parse::<u32>() {
                    return Some(num);
                }
            }
        }
    }
    None
}

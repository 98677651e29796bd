//! Raw provider data model.
//!
//! The upstream API returns the same logical quantity in several shapes
//! depending on era and statistic type. Everything shape-shifting is funneled
//! through [`StatValue`] at the ingestion boundary so the derivation modules
//! never have to guess per call site.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn from_provider(raw: &str) -> Option<Side> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Side::Home),
            "away" => Some(Side::Away),
            _ => None,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Which score snapshot a [`ScoreEntry`] describes.
///
/// Newer fixtures carry a `CURRENT` entry; fixtures recorded under the older
/// schema only have per-half entries, where `2ND_HALF` holds the cumulative
/// final score. Anything unrecognized maps to `Unknown` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDescription {
    Current,
    FirstHalf,
    SecondHalf,
    PenaltyShootout,
    Unknown,
}

impl ScoreDescription {
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CURRENT" => ScoreDescription::Current,
            "1ST_HALF" | "FIRST_HALF" => ScoreDescription::FirstHalf,
            "2ND_HALF" | "SECOND_HALF" => ScoreDescription::SecondHalf,
            "PENALTY_SHOOTOUT" | "PENALTIES" => ScoreDescription::PenaltyShootout,
            _ => ScoreDescription::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreEntry {
    pub description: ScoreDescription,
    pub type_id: Option<u32>,
    pub side: Side,
    pub goals: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub id: u64,
    pub side: Side,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FixtureSummary {
    pub id: u64,
    pub league_id: Option<u64>,
    pub starting_at: Option<DateTime<Utc>>,
    pub state_short: Option<String>,
    pub participants: Vec<Participant>,
    pub scores: Vec<ScoreEntry>,
}

impl FixtureSummary {
    pub fn participant(&self, side: Side) -> Option<&Participant> {
        self.participants.iter().find(|p| p.side == side)
    }

    pub fn side_of(&self, team_id: u64) -> Option<Side> {
        self.participants
            .iter()
            .find(|p| p.id == team_id)
            .map(|p| p.side)
    }

    /// Terminal states: the fixture result will not change anymore.
    pub fn is_full_time(&self) -> bool {
        matches!(
            self.state_short.as_deref(),
            Some("FT") | Some("AET") | Some("FT_PEN")
        )
    }
}

/// One value of a standings/statistics detail entry, keyed upstream by a
/// numeric type code.
///
/// The provider emits at least five shapes for the same kind of quantity:
/// a plain number, a `{count, percentage, ...}` object, an `{all, home, away}`
/// venue split, a numeric string, and (for scoring minutes) an object keyed by
/// period labels. [`StatValue::from_json`] classifies all of them totally;
/// anything else degrades to `Missing` instead of failing the document.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Number(f64),
    Counted {
        count: Option<f64>,
        total: Option<f64>,
        all: Option<f64>,
        percentage: Option<f64>,
    },
    Split {
        all: Option<f64>,
        home: Option<f64>,
        away: Option<f64>,
    },
    Nested(BTreeMap<String, StatValue>),
    Text(String),
    Missing,
}

impl StatValue {
    pub fn from_json(value: &Value) -> StatValue {
        match value {
            Value::Number(n) => n.as_f64().map(StatValue::Number).unwrap_or(StatValue::Missing),
            Value::String(s) => StatValue::Text(s.trim().to_string()),
            Value::Object(map) => {
                if map.contains_key("home") || map.contains_key("away") {
                    StatValue::Split {
                        all: field_number(map, "all"),
                        home: field_number(map, "home"),
                        away: field_number(map, "away"),
                    }
                } else if ["count", "total", "all", "percentage"]
                    .iter()
                    .any(|key| map.contains_key(*key))
                {
                    StatValue::Counted {
                        count: field_number(map, "count"),
                        total: field_number(map, "total"),
                        all: field_number(map, "all"),
                        percentage: field_number(map, "percentage"),
                    }
                } else {
                    StatValue::Nested(
                        map.iter()
                            .map(|(key, val)| (key.clone(), StatValue::from_json(val)))
                            .collect(),
                    )
                }
            }
            _ => StatValue::Missing,
        }
    }

    /// Total extraction to a single count.
    ///
    /// Priority inside an object: `count`, then `total`, then `all`. Numeric
    /// strings parse; everything unresolvable is `None` so callers choose
    /// their own semantic default.
    pub fn as_count(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Counted {
                count, total, all, ..
            } => count.or(*total).or(*all),
            StatValue::Split { all, .. } => *all,
            StatValue::Text(s) => s.trim().parse::<f64>().ok(),
            StatValue::Nested(_) | StatValue::Missing => None,
        }
    }
}

fn field_number(map: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key)
        .map(StatValue::from_json)
        .and_then(|v| v.as_count())
}

#[derive(Debug, Clone)]
pub struct StatDetail {
    pub type_id: u32,
    pub value: StatValue,
}

/// Look up the value for a type code. Unknown codes simply yield `None`.
pub fn detail_value(details: &[StatDetail], type_id: u32) -> Option<&StatValue> {
    details
        .iter()
        .find(|d| d.type_id == type_id)
        .map(|d| &d.value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLetter {
    Win,
    Draw,
    Loss,
}

impl FormLetter {
    pub fn from_provider(raw: &str) -> Option<FormLetter> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "W" => Some(FormLetter::Win),
            "D" => Some(FormLetter::Draw),
            "L" => Some(FormLetter::Loss),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            FormLetter::Win => 'W',
            FormLetter::Draw => 'D',
            FormLetter::Loss => 'L',
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSlot {
    pub letter: FormLetter,
    pub sort_order: f64,
}

#[derive(Debug, Clone)]
pub struct StandingRow {
    pub participant_id: u64,
    pub participant_name: Option<String>,
    pub position: Option<u32>,
    pub points: Option<f64>,
    pub details: Vec<StatDetail>,
    pub form: Vec<FormSlot>,
}

#[derive(Debug, Clone)]
pub struct OddsQuote {
    pub bookmaker_id: u64,
    pub bookmaker_name: Option<String>,
    pub market_id: u64,
    pub label: String,
    pub american: Option<f64>,
    pub decimal: Option<f64>,
}

impl OddsQuote {
    pub fn has_price(&self) -> bool {
        self.american.is_some() || self.decimal.is_some()
    }
}

/// Lenient kickoff parsing: RFC 3339 first, then the provider's legacy
/// space-separated form.
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

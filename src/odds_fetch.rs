//! Fetch and parse pre-match odds documents.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::OddsQuote;
use crate::provider_fetch::ProviderConfig;

pub fn fetch_fixture_odds(cfg: &ProviderConfig, fixture_id: u64) -> Result<Vec<OddsQuote>> {
    let url = format!(
        "{}/odds/pre-match/fixtures/{fixture_id}?include=bookmaker",
        cfg.base
    );
    let body = fetch_json_cached(http_client()?, &url, cfg.token.as_deref())
        .context("odds request failed")?;
    parse_odds_json(&body)
}

pub fn parse_odds_json(raw: &str) -> Result<Vec<OddsQuote>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid odds json")?;
    let mut out = Vec::new();
    if let Some(list) = root.get("data").and_then(Value::as_array) {
        for item in list {
            if let Some(quote) = parse_quote(item) {
                out.push(quote);
            }
        }
    }
    Ok(out)
}

fn parse_quote(v: &Value) -> Option<OddsQuote> {
    let bookmaker_id = v.get("bookmaker_id").and_then(Value::as_u64)?;
    let market_id = v.get("market_id").and_then(Value::as_u64)?;
    let label = v
        .get("label")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;
    let bookmaker_name = v
        .get("bookmaker")
        .and_then(|b| b.get("name"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(OddsQuote {
        bookmaker_id,
        bookmaker_name,
        market_id,
        label,
        american: pick_number(v, "american"),
        // The decimal price rides in `value`, usually as a string.
        decimal: pick_number(v, "value").or_else(|| pick_number(v, "decimal")),
    })
}

/// Prices arrive both as numbers and as numeric strings; anything else is a
/// missing price, never an error.
fn pick_number(v: &Value, key: &str) -> Option<f64> {
    match v.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_prices_parse_from_strings_and_numbers() {
        let raw = r#"{"data": [
            {"bookmaker_id": 2, "market_id": 1, "label": "1", "value": "1.95"},
            {"bookmaker_id": 2, "market_id": 1, "label": "X", "value": 3.4},
            {"bookmaker_id": 2, "market_id": 1, "label": "2", "value": "n/a"}
        ]}"#;
        let quotes = parse_odds_json(raw).expect("valid odds json");
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].decimal, Some(1.95));
        assert_eq!(quotes[1].decimal, Some(3.4));
        assert_eq!(quotes[2].decimal, None);
        assert!(!quotes[2].has_price());
    }

    #[test]
    fn null_and_empty_bodies_are_empty_not_errors() {
        assert!(parse_odds_json("null").expect("null parses").is_empty());
        assert!(parse_odds_json("  ").expect("blank parses").is_empty());
    }

    #[test]
    fn quotes_without_identity_are_skipped() {
        let raw = r#"{"data": [{"market_id": 1, "label": "1", "value": "2.0"}]}"#;
        assert!(parse_odds_json(raw).expect("parses").is_empty());
    }
}

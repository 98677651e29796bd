//! Market/bookmaker grouping and label canonicalization for betting quotes.
//!
//! Bookmakers do not agree on selection labels (`"1"` vs `"Home"`, `"more"`
//! vs `"Over"`), so raw quotes are rewritten against a per-market rule table
//! before the rendering layer ever sees them.

use std::collections::{BTreeMap, HashSet};

use crate::model::OddsQuote;
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone)]
pub struct SelectionQuote {
    pub label: String,
    pub american: Option<f64>,
    pub decimal: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BookmakerOffer {
    pub bookmaker_id: u64,
    pub bookmaker_name: String,
    pub selections: Vec<SelectionQuote>,
}

#[derive(Debug, Clone)]
pub struct MarketGroup {
    pub market_id: u64,
    pub bookmakers: Vec<BookmakerOffer>,
}

/// Group quotes by market, then by bookmaker, dropping bookmakers that carry
/// no priced quote at all for a market (they would render as blank rows).
///
/// Ordering is deterministic: markets ascend by id, bookmakers ascend by id
/// within a market, and three-way selections always emit Home, Draw, Away so
/// columns line up across bookmakers.
pub fn aggregate(
    quotes: &[OddsQuote],
    filter_bookmaker_ids: Option<&HashSet<u64>>,
    taxonomy: &Taxonomy,
) -> Vec<MarketGroup> {
    let mut markets: BTreeMap<u64, BTreeMap<u64, BookmakerOffer>> = BTreeMap::new();

    for quote in quotes {
        if let Some(filter) = filter_bookmaker_ids {
            if !filter.contains(&quote.bookmaker_id) {
                continue;
            }
        }
        let offer = markets
            .entry(quote.market_id)
            .or_default()
            .entry(quote.bookmaker_id)
            .or_insert_with(|| BookmakerOffer {
                bookmaker_id: quote.bookmaker_id,
                bookmaker_name: quote.bookmaker_name.clone().unwrap_or_default(),
                selections: Vec::new(),
            });
        if offer.bookmaker_name.is_empty() {
            if let Some(name) = quote.bookmaker_name.as_deref() {
                offer.bookmaker_name = name.to_string();
            }
        }
        offer.selections.push(SelectionQuote {
            label: canonical_label(quote.market_id, &quote.label, taxonomy),
            american: quote.american,
            decimal: quote.decimal,
        });
    }

    markets
        .into_iter()
        .map(|(market_id, bookmakers)| {
            let mut bookmakers: Vec<BookmakerOffer> = bookmakers
                .into_values()
                .filter(|offer| offer.selections.iter().any(has_price))
                .collect();
            if market_id == taxonomy.market_three_way {
                for offer in &mut bookmakers {
                    offer
                        .selections
                        .sort_by_key(|sel| three_way_rank(&sel.label));
                }
            }
            MarketGroup {
                market_id,
                bookmakers,
            }
        })
        .filter(|group| !group.bookmakers.is_empty())
        .collect()
}

fn has_price(selection: &SelectionQuote) -> bool {
    selection.american.is_some() || selection.decimal.is_some()
}

/// Rewrite a raw provider label to the canonical display label for a market.
/// Unrecognized labels pass through unchanged.
pub fn canonical_label(market_id: u64, raw: &str, taxonomy: &Taxonomy) -> String {
    let trimmed = raw.trim();
    if market_id == taxonomy.market_three_way {
        match trimmed.to_ascii_lowercase().as_str() {
            "1" | "home" => return "Home".to_string(),
            "x" | "draw" => return "Draw".to_string(),
            "2" | "away" => return "Away".to_string(),
            _ => {}
        }
    } else if market_id == taxonomy.market_btts {
        match trimmed.to_ascii_lowercase().as_str() {
            "yes" => return "Yes".to_string(),
            "no" => return "No".to_string(),
            _ => {}
        }
    } else if market_id == taxonomy.market_over_under {
        return normalize_over_under(trimmed);
    }
    trimmed.to_string()
}

/// Token-level rewrite for over/under labels: some feeds say `more 2.5` /
/// `less 2.5` where others say `Over 2.5` / `Under 2.5`.
fn normalize_over_under(raw: &str) -> String {
    raw.split_whitespace()
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "more" | "over" => "Over".to_string(),
            "less" | "under" => "Under".to_string(),
            _ => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn three_way_rank(canonical: &str) -> u8 {
    match canonical {
        "Home" => 0,
        "Draw" => 1,
        "Away" => 2,
        _ => 3,
    }
}

/// Pick the deterministic default pair of bookmakers for the baseline market.
///
/// Preference order: both configured primary ids when both carry valid quotes;
/// one primary padded with the first other bookmaker alphabetically by name;
/// otherwise the first two alphabetically. Returns fewer than two ids only
/// when the market itself has fewer valid bookmakers.
pub fn default_bookmakers(
    markets: &[MarketGroup],
    baseline_market_id: u64,
    primary_ids: (u64, u64),
) -> Vec<u64> {
    let Some(group) = markets.iter().find(|g| g.market_id == baseline_market_id) else {
        return Vec::new();
    };

    let mut chosen: Vec<u64> = [primary_ids.0, primary_ids.1]
        .into_iter()
        .filter(|id| group.bookmakers.iter().any(|b| b.bookmaker_id == *id))
        .collect();
    chosen.dedup();

    if chosen.len() < 2 {
        let mut rest: Vec<&BookmakerOffer> = group
            .bookmakers
            .iter()
            .filter(|b| !chosen.contains(&b.bookmaker_id))
            .collect();
        rest.sort_by(|a, b| {
            a.bookmaker_name
                .cmp(&b.bookmaker_name)
                .then(a.bookmaker_id.cmp(&b.bookmaker_id))
        });
        for offer in rest {
            if chosen.len() >= 2 {
                break;
            }
            chosen.push(offer.bookmaker_id);
        }
    }

    chosen
}

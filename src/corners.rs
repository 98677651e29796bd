//! Contextual corner averages per team.

use crate::model::{StatDetail, StatValue, detail_value};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenueCornerAverage {
    pub total: Option<f64>,
    /// Corners per game in this venue context, one decimal. `None` when either
    /// the total is unknown or no games were played there — never `0` and
    /// never infinite.
    pub average: Option<f64>,
    pub games: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAverages {
    pub home: VenueCornerAverage,
    pub away: VenueCornerAverage,
}

/// Derive a team's home-context and away-context corner averages.
///
/// Newer payloads split corner totals by venue; older ones carry one flat
/// number with no split, which then stands in for both contexts.
pub fn project(
    details: &[StatDetail],
    games_played_home: u32,
    games_played_away: u32,
    taxonomy: &Taxonomy,
) -> CornerAverages {
    let (home_total, away_total) = match detail_value(details, taxonomy.corners) {
        Some(StatValue::Split { home, away, .. }) => (*home, *away),
        Some(other) => {
            let flat = other.as_count();
            (flat, flat)
        }
        None => (None, None),
    };

    CornerAverages {
        home: venue_average(home_total, games_played_home),
        away: venue_average(away_total, games_played_away),
    }
}

fn venue_average(total: Option<f64>, games: u32) -> VenueCornerAverage {
    let average = match (total, games) {
        (Some(total), games) if games > 0 => Some(round_one_decimal(total / games as f64)),
        _ => None,
    };
    VenueCornerAverage {
        total,
        average,
        games,
    }
}

/// Fixture-level corner expectation: the home team's home average plus the
/// away team's away average. Omitted entirely when either side is unknown —
/// a half-computed figure would look like a real number.
pub fn combined_expectation(
    home_side: &VenueCornerAverage,
    away_side: &VenueCornerAverage,
) -> Option<f64> {
    match (home_side.average, away_side.average) {
        (Some(home), Some(away)) => Some(round_one_decimal(home + away)),
        _ => None,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Canonical goal counts across data eras.

use crate::model::{ScoreDescription, ScoreEntry, Side};

/// Resolve the canonical goal count for one side of a fixture.
///
/// Fallback chain per side: `CURRENT` (modern schema), then `2ND_HALF` (the
/// cumulative final score in the legacy schema), then `1ST_HALF` as a partial
/// last resort. A tier only resolves when it carries a concrete goals value,
/// so a present-but-empty entry falls through instead of masking later tiers.
/// `None` means unknown; `0` is a real score and is never used as a stand-in.
pub fn resolve_goals(scores: &[ScoreEntry], side: Side) -> Option<u32> {
    for description in [
        ScoreDescription::Current,
        ScoreDescription::SecondHalf,
        ScoreDescription::FirstHalf,
    ] {
        let resolved = scores
            .iter()
            .filter(|entry| entry.side == side && entry.description == description)
            .find_map(|entry| entry.goals);
        if resolved.is_some() {
            return resolved;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: ScoreDescription, side: Side, goals: Option<u32>) -> ScoreEntry {
        ScoreEntry {
            description,
            type_id: None,
            side,
            goals,
        }
    }

    #[test]
    fn current_wins_over_everything() {
        let scores = vec![
            entry(ScoreDescription::SecondHalf, Side::Home, Some(3)),
            entry(ScoreDescription::Current, Side::Home, Some(2)),
            entry(ScoreDescription::FirstHalf, Side::Home, Some(1)),
        ];
        assert_eq!(resolve_goals(&scores, Side::Home), Some(2));
    }

    #[test]
    fn legacy_second_half_is_the_final_score() {
        let scores = vec![
            entry(ScoreDescription::FirstHalf, Side::Away, Some(0)),
            entry(ScoreDescription::SecondHalf, Side::Away, Some(1)),
        ];
        assert_eq!(resolve_goals(&scores, Side::Away), Some(1));
    }

    #[test]
    fn first_half_is_the_last_resort() {
        let scores = vec![entry(ScoreDescription::FirstHalf, Side::Home, Some(0))];
        assert_eq!(resolve_goals(&scores, Side::Home), Some(0));
    }

    #[test]
    fn nothing_resolvable_is_none_not_zero() {
        let scores = vec![
            entry(ScoreDescription::PenaltyShootout, Side::Home, Some(4)),
            entry(ScoreDescription::Unknown, Side::Home, Some(9)),
            entry(ScoreDescription::Current, Side::Home, None),
        ];
        assert_eq!(resolve_goals(&scores, Side::Home), None);
        assert_eq!(resolve_goals(&[], Side::Away), None);
    }

    #[test]
    fn sides_resolve_from_independent_tiers() {
        // Partially migrated fixture: home already has CURRENT, away only the
        // legacy per-half entries.
        let scores = vec![
            entry(ScoreDescription::Current, Side::Home, Some(2)),
            entry(ScoreDescription::SecondHalf, Side::Away, Some(1)),
        ];
        assert_eq!(resolve_goals(&scores, Side::Home), Some(2));
        assert_eq!(resolve_goals(&scores, Side::Away), Some(1));
    }
}

//! Recent-form derivation from a team's chronological fixture list.

use chrono::{DateTime, Utc};

use crate::model::{FixtureSummary, FormLetter, Side};
use crate::score::resolve_goals;

pub const DEFAULT_FORM_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct FormMatch {
    pub result: FormLetter,
    pub goals_for: u32,
    pub goals_against: u32,
    pub opponent: String,
    pub kickoff: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormSummary {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

/// Derive the W/D/L sequence for a team, most recent fixture first.
///
/// Only full-time fixtures count. Fixtures where the team does not appear in
/// the participant list are skipped (referential mismatch yields an empty
/// contribution, not a crash). Scores resolve through the era fallback chain;
/// an unresolvable side counts as 0 for the comparison only — a finished
/// fixture still needs a definite result classification.
pub fn recent_form(fixtures: &[FixtureSummary], team_id: u64, limit: usize) -> Vec<FormMatch> {
    let mut finished: Vec<&FixtureSummary> = fixtures
        .iter()
        .filter(|f| f.is_full_time() && f.side_of(team_id).is_some())
        .collect();
    finished.sort_by(|a, b| cmp_kickoff_desc(a.starting_at, b.starting_at));

    finished
        .into_iter()
        .take(limit)
        .filter_map(|fixture| {
            let side = fixture.side_of(team_id)?;
            let goals_for = resolve_goals(&fixture.scores, side).unwrap_or(0);
            let goals_against = resolve_goals(&fixture.scores, side.other()).unwrap_or(0);
            let result = if goals_for > goals_against {
                FormLetter::Win
            } else if goals_for < goals_against {
                FormLetter::Loss
            } else {
                FormLetter::Draw
            };
            Some(FormMatch {
                result,
                goals_for,
                goals_against,
                opponent: fixture
                    .participant(side.other())
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                kickoff: fixture.starting_at,
            })
        })
        .collect()
}

pub fn summarize(form: &[FormMatch]) -> FormSummary {
    form.iter().fold(FormSummary::default(), |mut acc, m| {
        match m.result {
            FormLetter::Win => acc.wins += 1,
            FormLetter::Draw => acc.draws += 1,
            FormLetter::Loss => acc.losses += 1,
        }
        acc.points = acc.wins * 3 + acc.draws;
        acc.goals_for += m.goals_for;
        acc.goals_against += m.goals_against;
        acc
    })
}

fn cmp_kickoff_desc(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Participant, ScoreDescription, ScoreEntry};
    use chrono::TimeZone;

    fn fixture(id: u64, day: u32, state: &str, home_goals: u32, away_goals: u32) -> FixtureSummary {
        FixtureSummary {
            id,
            league_id: Some(8),
            starting_at: Some(Utc.with_ymd_and_hms(2024, 3, day, 15, 0, 0).unwrap()),
            state_short: Some(state.to_string()),
            participants: vec![
                Participant {
                    id: 10,
                    side: Side::Home,
                    name: "Alpha".to_string(),
                },
                Participant {
                    id: 20,
                    side: Side::Away,
                    name: "Beta".to_string(),
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
    fn only_finished_fixtures_count_and_newest_comes_first() {
        let fixtures = vec![
            fixture(1, 1, "FT", 2, 0),
            fixture(2, 5, "NS", 0, 0),
            fixture(3, 9, "FT", 1, 1),
        ];
        let form = recent_form(&fixtures, 10, DEFAULT_FORM_LIMIT);
        assert_eq!(form.len(), 2);
        assert_eq!(form[0].result, FormLetter::Draw);
        assert_eq!(form[1].result, FormLetter::Win);
        assert_eq!(form[0].opponent, "Beta");
    }

    #[test]
    fn summary_points_are_three_per_win_plus_draws() {
        let fixtures = vec![
            fixture(1, 1, "FT", 2, 0),
            fixture(2, 2, "FT", 0, 3),
            fixture(3, 3, "FT", 1, 1),
        ];
        let summary = summarize(&recent_form(&fixtures, 10, DEFAULT_FORM_LIMIT));
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.points, 4);
        assert_eq!(summary.goals_for, 3);
        assert_eq!(summary.goals_against, 4);
    }

    #[test]
    fn team_missing_from_participants_contributes_nothing() {
        let fixtures = vec![fixture(1, 1, "FT", 2, 0)];
        assert!(recent_form(&fixtures, 999, DEFAULT_FORM_LIMIT).is_empty());
    }
}

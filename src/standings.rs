//! Standings projection with re-ranking for venue-split views.

use std::cmp::Ordering;

use crate::model::{FormLetter, StandingRow, StatValue, detail_value};
use crate::taxonomy::{Taxonomy, ViewCodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableView {
    Overall,
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Qualification,
    Relegation,
}

#[derive(Debug, Clone)]
pub struct ProjectedRow {
    pub participant_id: u64,
    pub participant_name: Option<String>,
    /// 1-based display position: provider rank for `Overall`, post-sort index
    /// for the re-ranked views.
    pub position: u32,
    pub played: Option<f64>,
    pub points: Option<f64>,
    pub goal_difference: Option<f64>,
    pub zone: Option<Zone>,
    pub form: Vec<FormLetter>,
}

/// Project raw standing rows into an ordered table for one view.
///
/// `Overall` trusts the provider's order and position field, which are
/// authoritative. `Home`/`Away` re-rank from scratch because the provider
/// ships no precomputed rank or goal difference for venue splits: points
/// descending, then goal difference descending, then ascending participant id
/// so equal keys still order deterministically. Rows whose points cannot be
/// resolved sort after every resolvable row.
pub fn project(rows: &[StandingRow], view: TableView, taxonomy: &Taxonomy) -> Vec<ProjectedRow> {
    match view {
        TableView::Overall => project_overall(rows, &taxonomy.overall),
        TableView::Home => project_ranked(rows, &taxonomy.home),
        TableView::Away => project_ranked(rows, &taxonomy.away),
    }
}

/// Qualification band: the top four table positions.
const QUALIFICATION_POSITIONS: usize = 4;
/// Relegation band starts at this 0-based index. Fixed for a 20-team table;
/// competitions of other sizes are not special-cased.
const RELEGATION_FROM_INDEX: usize = 17;

fn project_overall(rows: &[StandingRow], codes: &ViewCodes) -> Vec<ProjectedRow> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let zone = if index < QUALIFICATION_POSITIONS {
                Some(Zone::Qualification)
            } else if index >= RELEGATION_FROM_INDEX {
                Some(Zone::Relegation)
            } else {
                None
            };
            ProjectedRow {
                participant_id: row.participant_id,
                participant_name: row.participant_name.clone(),
                position: row.position.unwrap_or(index as u32 + 1),
                played: code_count(row, codes.played),
                points: row.points.or_else(|| code_count(row, codes.points)),
                goal_difference: goal_difference(row, codes),
                zone,
                form: sorted_form(row),
            }
        })
        .collect()
}

fn project_ranked(rows: &[StandingRow], codes: &ViewCodes) -> Vec<ProjectedRow> {
    let mut keyed: Vec<(RankKey, &StandingRow)> = rows
        .iter()
        .map(|row| {
            (
                RankKey {
                    points: code_count(row, codes.points),
                    goal_difference: goal_difference(row, codes),
                    participant_id: row.participant_id,
                },
                row,
            )
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    keyed
        .into_iter()
        .enumerate()
        .map(|(index, (key, row))| ProjectedRow {
            participant_id: row.participant_id,
            participant_name: row.participant_name.clone(),
            position: index as u32 + 1,
            played: code_count(row, codes.played),
            points: key.points,
            goal_difference: key.goal_difference,
            // Zones are defined on the overall table only.
            zone: None,
            form: sorted_form(row),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct RankKey {
    points: Option<f64>,
    goal_difference: Option<f64>,
    participant_id: u64,
}

impl RankKey {
    fn cmp(&self, other: &RankKey) -> Ordering {
        cmp_desc_none_last(self.points, other.points)
            .then_with(|| cmp_desc_none_last(self.goal_difference, other.goal_difference))
            .then_with(|| self.participant_id.cmp(&other.participant_id))
    }
}

/// Descending on the value; `None` ranks below any number.
fn cmp_desc_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn code_count(row: &StandingRow, type_id: u32) -> Option<f64> {
    detail_value(&row.details, type_id).and_then(StatValue::as_count)
}

fn goal_difference(row: &StandingRow, codes: &ViewCodes) -> Option<f64> {
    let goals_for = code_count(row, codes.goals_for)?;
    let goals_against = code_count(row, codes.goals_against)?;
    Some(goals_for - goals_against)
}

fn sorted_form(row: &StandingRow) -> Vec<FormLetter> {
    let mut slots: Vec<_> = row.form.iter().collect();
    slots.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
    slots.into_iter().map(|slot| slot.letter).collect()
}

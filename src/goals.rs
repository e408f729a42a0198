use tracing::debug;

use crate::diagnostics::{self, Built, RowReader};
use crate::models::{Goal, Progress};
use crate::ordering;
use crate::schema;
use crate::table::DataTable;

/// Scores are drawn on a fixed 0 to 5 gauge.
pub const GAUGE_MIN: f64 = 0.0;
pub const GAUGE_MAX: f64 = 5.0;

/// Share of the gauge arc a score fills, clamped to `[0, 1]`.
pub fn gauge_fraction(score: f64) -> f64 {
    ((score - GAUGE_MIN) / (GAUGE_MAX - GAUGE_MIN)).clamp(0.0, 1.0)
}

/// One goal per row, each carrying that row's assignee.
pub fn goal_rows(table: &DataTable) -> Built<Goal> {
    let columns = table.column_map();
    diagnostics::warn_missing_columns(&columns, schema::GOAL_COLUMNS, "goal");

    let mut built = Built::default();
    for (index, row) in table.rows.iter().enumerate() {
        let mut reader = RowReader::new(row, &columns, index);
        let title = reader.text(&schema::GOAL_TITLE);
        let goal = Goal {
            title: title.clone().unwrap_or_default(),
            score: reader.number(&schema::GOAL_SCORE),
            detail: reader.text(&schema::GOAL_DETAIL),
            sector: reader.text(&schema::GOAL_SECTOR),
            assignees: reader.text(&schema::GOAL_ASSIGNEE).into_iter().collect(),
            priority: reader.text(&schema::GOAL_PRIORITY),
            progress: reader
                .text(&schema::GOAL_PROGRESS)
                .map(|label| Progress::from_label(&label)),
        };
        if title.is_some() {
            built.records.push(goal);
        } else {
            reader.missing_identity(&schema::GOAL_TITLE);
        }
        built.push_diagnostic(reader.finish());
    }
    built
}

/// Merges goal rows sharing a title; the first row's fields win and the
/// assignees accumulate without repeats.
pub fn merge_by_title(rows: Vec<Goal>) -> Vec<Goal> {
    let mut merged: Vec<Goal> = Vec::new();
    for goal in rows {
        match merged.iter_mut().find(|existing| existing.title == goal.title) {
            Some(existing) => {
                for assignee in goal.assignees {
                    if !existing.assignees.contains(&assignee) {
                        existing.assignees.push(assignee);
                    }
                }
            }
            None => merged.push(goal),
        }
    }
    merged
}

/// Distinct goals of the data view, in natural title order.
pub fn build_goals(table: &DataTable) -> Built<Goal> {
    let rows = goal_rows(table);
    let row_count = rows.records.len();

    let mut goals = merge_by_title(rows.records);
    ordering::sort_naturally(&mut goals, |goal| goal.title.as_str());

    debug!(rows = row_count, goals = goals.len(), "built goals");
    Built {
        records: goals,
        diagnostics: rows.diagnostics,
    }
}

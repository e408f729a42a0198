//! Project phase timeline with milestones.
//!
//! Each row carries one phase and, independently, one milestone. The first
//! row also publishes the window the timeline is drawn for.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{self, RecordDiagnostic, RowReader};
use crate::models::{Milestone, ProjectPhase};
use crate::ordering;
use crate::period;
use crate::schema;
use crate::table::DataTable;

/// Phases starting before this year are treated as placeholders.
const EARLIEST_PHASE_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub phases: Vec<ProjectPhase>,
    pub diagnostics: Vec<RecordDiagnostic>,
}

struct PhaseRow {
    project: String,
    phase: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

pub fn build_timeline(table: &DataTable) -> Timeline {
    let columns = table.column_map();
    diagnostics::warn_missing_columns(&columns, schema::TIMELINE_COLUMNS, "timeline");

    let mut diagnostics = Vec::new();
    let mut phase_rows = Vec::new();
    let mut milestones = Vec::new();
    let mut window = (None, None);

    for (index, row) in table.rows.iter().enumerate() {
        let mut reader = RowReader::new(row, &columns, index);
        if index == 0 {
            window = (
                reader.date(&schema::WINDOW_START),
                reader.date(&schema::WINDOW_END),
            );
        }
        if let Some(project) = reader.text(&schema::PROJECT) {
            phase_rows.push(PhaseRow {
                project,
                phase: reader.text(&schema::PHASE),
                start: reader.date(&schema::PHASE_START),
                end: reader.date(&schema::PHASE_END),
            });
        }
        if let Some(project) = reader.text(&schema::MILESTONE_PROJECT) {
            milestones.push(Milestone {
                project,
                name: reader.text(&schema::MILESTONE),
                date: reader.date(&schema::MILESTONE_DATE),
            });
        }
        if let Some(diagnostic) = reader.finish() {
            diagnostics.push(diagnostic);
        }
    }

    let milestones = ordering::dedup_by_key(milestones, |milestone| milestone.clone());

    let kept: Vec<(PhaseRow, NaiveDate, NaiveDate)> = phase_rows
        .into_iter()
        .filter_map(|row| {
            let (start, end) = (row.start?, row.end?);
            let has_milestone = milestones
                .iter()
                .any(|milestone| milestone.project == row.project);
            (start.year() >= EARLIEST_PHASE_YEAR && has_milestone).then_some((row, start, end))
        })
        .collect();

    let earliest = kept.iter().map(|(_, start, _)| *start).min();
    let latest = kept.iter().map(|(_, _, end)| *end).max();
    let (window_start, window_end) = window;
    let lower = match (window_start, earliest) {
        (Some(window_start), Some(earliest)) => Some(window_start.max(earliest)),
        (window_start, earliest) => window_start.or(earliest),
    };
    let upper = window_end.or(latest);

    let mut phases: Vec<ProjectPhase> = kept
        .into_iter()
        .map(|(row, start, end)| {
            let (start, end) = match (lower, upper) {
                (Some(lower), Some(upper)) => period::clamp_range(start, end, lower, upper),
                _ => (start, end),
            };
            let project_milestones = milestones
                .iter()
                .filter(|milestone| milestone.project == row.project)
                .cloned()
                .collect();
            ProjectPhase {
                project: row.project,
                phase: row.phase,
                start,
                end,
                milestones: project_milestones,
            }
        })
        .collect();
    phases.sort_by(|a, b| ordering::locale_cmp(&a.project, &b.project));

    debug!(phases = phases.len(), milestones = milestones.len(), "built timeline");
    Timeline {
        start: lower,
        end: upper,
        phases,
        diagnostics,
    }
}

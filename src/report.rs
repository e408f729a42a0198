use std::collections::HashMap;
use std::fmt::Write;
use std::hash::Hash;

use crate::config::Palette;
use crate::diagnostics::RecordDiagnostic;
use crate::format;
use crate::goals;
use crate::models::{Goal, ReevaluationEntry, ReviewerSummary, Rig, Service};
use crate::period::ReportingYear;
use crate::services;
use crate::status::{self, AppliedMarker, Classification, MotivationStatus};
use crate::timeline::Timeline;

const MAX_LISTED_ISSUES: usize = 10;

/// Occurrences per outcome, in first-seen order.
fn tally<T: Copy + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut order = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();
    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|item| (item, counts[&item]))
        .collect()
}

fn write_diagnostics(output: &mut String, diagnostics: &[RecordDiagnostic]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## Data Issues");

    if diagnostics.is_empty() {
        let _ = writeln!(output, "No malformed cells found.");
        return;
    }

    let _ = writeln!(output, "{} rows had unreadable fields.", diagnostics.len());
    for diagnostic in diagnostics.iter().take(MAX_LISTED_ISSUES) {
        let issues: Vec<String> = diagnostic.issues.iter().map(|issue| issue.to_string()).collect();
        let _ = writeln!(output, "- row {}: {}", diagnostic.row + 1, issues.join("; "));
    }
}

pub fn rigs_report(rigs: &[Rig], diagnostics: &[RecordDiagnostic]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Rigs");
    let _ = writeln!(output);

    if rigs.is_empty() {
        let _ = writeln!(output, "No rigs in this data view.");
    } else {
        let _ = writeln!(output, "| Code | Name | Capacity | Positioning |");
        let _ = writeln!(output, "|---|---|---|---|");
    }
    for rig in rigs {
        let _ = writeln!(
            output,
            "| {} | {} | {} / {} | {} |",
            rig.code,
            rig.name.as_deref().unwrap_or("-"),
            rig.current_capacity.as_deref().unwrap_or("-"),
            rig.total_capacity.as_deref().unwrap_or("-"),
            rig.positioning.as_deref().unwrap_or("-")
        );
    }

    write_diagnostics(&mut output, diagnostics);
    output
}

/// Writes one bar line per matching service and returns how many matched.
fn write_services(
    output: &mut String,
    year: Option<ReportingYear>,
    services: &[Service],
    classifications: &[Classification],
    matches: impl Fn(&Service) -> bool,
) -> usize {
    let mut written = 0;
    for (service, classification) in services.iter().zip(classifications) {
        if !matches(service) {
            continue;
        }
        written += 1;
        let (start, end) = match year {
            Some(year) => service.bar_within(year),
            None => (service.start, service.end),
        };
        let _ = writeln!(
            output,
            "- {} to {}: {} ({}) [{} / {} / {}]",
            format::format_date(start),
            format::format_date(end),
            service.well.as_deref().unwrap_or("-"),
            service.service_type.as_deref().unwrap_or("-"),
            classification.review.label(),
            classification.motivation.label(),
            classification.applied.label()
        );
    }
    written
}

pub fn schedule_report(
    year: Option<ReportingYear>,
    rigs: &[Rig],
    services: &[Service],
    diagnostics: &[RecordDiagnostic],
    palette: &Palette,
) -> String {
    let overview = services::schedule_overview(rigs, services);
    let classifications: Vec<_> = services
        .iter()
        .map(|service| status::classify(service, palette))
        .collect();

    let mut output = String::new();
    match year {
        Some(year) => {
            let _ = writeln!(output, "# Rig Schedule {}", year.value());
        }
        None => {
            let _ = writeln!(output, "# Rig Schedule");
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## General Information");
    let _ = writeln!(output, "- {} rigs", overview.rigs);
    let _ = writeln!(output, "- {} interventions", overview.services);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Re-evaluation Status");
    if classifications.is_empty() {
        let _ = writeln!(output, "No interventions scheduled for this year.");
    } else {
        let reviews = tally(classifications.iter().map(|c| c.review));
        for (status, count) in reviews {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                status.label(),
                count,
                palette.review_color(status)
            );
        }
        let motivations = tally(
            classifications
                .iter()
                .map(|c| c.motivation)
                .filter(|status| *status == MotivationStatus::HasMotivation),
        );
        for (status, count) in motivations {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                status.label(),
                count,
                palette.motivation_color(status)
            );
        }
        let applied = tally(
            classifications
                .iter()
                .map(|c| c.applied)
                .filter(|marker| *marker != AppliedMarker::None),
        );
        for (marker, count) in applied {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                marker.label(),
                count,
                palette.marker_color(marker)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Schedule by Rig");
    if rigs.is_empty() {
        let _ = writeln!(output, "No rigs in this data view.");
    }
    for rig in rigs {
        let _ = writeln!(output);
        match &rig.name {
            Some(name) => {
                let _ = writeln!(output, "### {} ({})", rig.code, name);
            }
            None => {
                let _ = writeln!(output, "### {}", rig.code);
            }
        }
        let written = write_services(&mut output, year, services, &classifications, |service| {
            service
                .rig
                .as_ref()
                .is_some_and(|own| own.code == rig.code && own.name == rig.name)
        });
        if written == 0 {
            let _ = writeln!(output, "- No interventions this year.");
        }
    }

    if services.iter().any(|service| service.rig.is_none()) {
        let _ = writeln!(output);
        let _ = writeln!(output, "### No rig informed");
        write_services(&mut output, year, services, &classifications, |service| {
            service.rig.is_none()
        });
    }

    write_diagnostics(&mut output, diagnostics);
    output
}

pub fn reevaluation_report(
    entries: &[ReevaluationEntry],
    diagnostics: &[RecordDiagnostic],
    palette: &Palette,
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Re-evaluation Report");
    let _ = writeln!(output);

    if entries.is_empty() {
        let _ = writeln!(output, "No re-evaluations recorded.");
    }

    for entry in entries {
        let marker = entry.applied_marker();
        let generalist = &entry.reevaluation.generalist;
        let specialist = &entry.reevaluation.specialist;
        let _ = writeln!(
            output,
            "## {} / {}",
            entry.rig,
            entry.well.as_deref().unwrap_or("-")
        );
        let _ = writeln!(
            output,
            "- Site: {}",
            entry.site.as_deref().unwrap_or(format::NOT_INFORMED)
        );
        let _ = writeln!(
            output,
            "- Service: {} ({})",
            entry.service_type.as_deref().unwrap_or(format::NOT_INFORMED),
            entry.task_type.as_deref().unwrap_or("-")
        );
        if let Some(description) = &entry.description {
            let _ = writeln!(output, "- Description: {description}");
        }
        let _ = writeln!(
            output,
            "- Generalist: {} ({})",
            generalist.name.as_deref().unwrap_or(format::NOT_INFORMED),
            generalist.notes.as_deref().unwrap_or("no notes")
        );
        let _ = writeln!(
            output,
            "- Specialist: {} ({})",
            specialist.name.as_deref().unwrap_or(format::NOT_INFORMED),
            specialist.notes.as_deref().unwrap_or("no notes")
        );
        let _ = writeln!(
            output,
            "- Applied: {} ({})",
            marker.label(),
            palette.marker_color(marker)
        );
        let _ = writeln!(
            output,
            "- Inventory value: {}",
            format::format_optional_brl(entry.reevaluation.inventory_value)
        );
        let _ = writeln!(output);
    }

    write_diagnostics(&mut output, diagnostics);
    output
}

pub fn goals_report(goals: &[Goal], diagnostics: &[RecordDiagnostic]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Goals");
    let _ = writeln!(output);

    if goals.is_empty() {
        let _ = writeln!(output, "No goals recorded.");
    }

    for goal in goals {
        let gauge = goal
            .score
            .map(|score| format::gauge_bar(goals::gauge_fraction(score), 10))
            .unwrap_or_default();
        let _ = writeln!(
            output,
            "- {}: {} {} (sector {}, assigned to {})",
            goal.title,
            format::format_score(goal.score),
            gauge,
            goal.sector.as_deref().unwrap_or("-"),
            if goal.assignees.is_empty() {
                "nobody".to_string()
            } else {
                goal.assignees.join(", ")
            }
        );
    }

    write_diagnostics(&mut output, diagnostics);
    output
}

pub fn reviewers_report(reviewers: &[ReviewerSummary], diagnostics: &[RecordDiagnostic]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Reviewer Scorecards");

    if reviewers.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No assigned goals.");
    }

    for reviewer in reviewers {
        let counts = &reviewer.counts;
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", reviewer.name);
        let _ = writeln!(
            output,
            "Score {} across {} goals: {} in progress, {} not started, {} completed",
            format::format_score(reviewer.average_score),
            reviewer.goals.len(),
            counts.in_progress,
            counts.not_started,
            counts.completed
        );
        if counts.unrecognized > 0 {
            let _ = writeln!(
                output,
                "{} goals carry no recognized progress label.",
                counts.unrecognized
            );
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "| Goal | Sector | Progress | Priority | Score |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for goal in &reviewer.goals {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                goal.title,
                goal.sector.as_deref().unwrap_or("-"),
                goal.progress.as_ref().map(|progress| progress.label()).unwrap_or("-"),
                goal.priority.as_deref().unwrap_or("-"),
                format::format_score(goal.score)
            );
        }
    }

    write_diagnostics(&mut output, diagnostics);
    output
}

pub fn timeline_report(timeline: &Timeline) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Project Timeline");

    if let (Some(start), Some(end)) = (timeline.start, timeline.end) {
        let _ = writeln!(
            output,
            "Window {} to {}",
            format::format_date(start),
            format::format_date(end)
        );
    }
    let _ = writeln!(output);

    if timeline.phases.is_empty() {
        let _ = writeln!(output, "No phases with milestones in this data view.");
    }

    for phase in &timeline.phases {
        let _ = writeln!(
            output,
            "- {} / {}: {} to {}",
            phase.project,
            phase.phase.as_deref().unwrap_or("-"),
            format::format_date(phase.start),
            format::format_date(phase.end)
        );
        for milestone in &phase.milestones {
            let date = milestone
                .date
                .map(format::format_date)
                .unwrap_or_else(|| format::NOT_INFORMED.to_string());
            let _ = writeln!(
                output,
                "  - {} on {}",
                milestone.name.as_deref().unwrap_or("milestone"),
                date
            );
        }
    }

    write_diagnostics(&mut output, &timeline.diagnostics);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MotivationEffort, Progress, Project, Reevaluation, ReviewerSlot};
    use crate::reviewers;
    use crate::status::ReviewStatus;
    use chrono::NaiveDate;

    fn rig(code: &str) -> Rig {
        Rig {
            code: code.to_string(),
            name: Some("Alfa".to_string()),
            total_capacity: None,
            current_capacity: None,
            positioning: None,
        }
    }

    fn service(code: &str, evaluated: bool) -> Service {
        let slot = ReviewerSlot {
            was_evaluated: Some(evaluated),
            ..ReviewerSlot::default()
        };
        Service {
            rig: (!code.is_empty()).then(|| rig(code)),
            project: Project {
                project: None,
                site: None,
            },
            well: Some("7-XYZ-1".to_string()),
            start: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            duration: None,
            service_type: Some("Completação".to_string()),
            description: None,
            reevaluation: Reevaluation {
                generalist: slot,
                ..Reevaluation::default()
            },
            motivation: MotivationEffort::default(),
        }
    }

    #[test]
    fn tally_keeps_first_seen_order() {
        assert_eq!(
            tally([ReviewStatus::Started, ReviewStatus::NotReviewed, ReviewStatus::Started]),
            vec![(ReviewStatus::Started, 2), (ReviewStatus::NotReviewed, 1)]
        );
    }

    #[test]
    fn rigs_report_renders_a_table() {
        let report = rigs_report(&[rig("NS-1")], &[]);
        assert!(report.contains("| NS-1 | Alfa | - / - | - |"));
    }

    #[test]
    fn schedule_report_lists_overview_and_clamped_bars() {
        let rigs = vec![rig("NS-1"), rig("NS-2")];
        let services = vec![service("NS-1", true), service("NS-1", false)];
        let report = schedule_report(
            Some(ReportingYear::new(2024)),
            &rigs,
            &services,
            &[],
            &Palette::default(),
        );

        assert!(report.contains("# Rig Schedule 2024"));
        assert!(report.contains("- 2 rigs"));
        assert!(report.contains("- 2 interventions"));
        assert!(report.contains("re-evaluation started: 1 (#ff5d27ff)"));
        assert!(report.contains("not reviewed: 1 (#d3d3d3)"));
        assert!(report.contains("01/01/2024 to 01/02/2024: 7-XYZ-1 (Completação)"));
        assert!(report.contains("### NS-2 (Alfa)\n- No interventions this year."));
        assert!(report.contains("No malformed cells found."));
    }

    #[test]
    fn services_without_a_rig_get_their_own_section() {
        let services = vec![service("", false)];
        let report = schedule_report(
            Some(ReportingYear::new(2024)),
            &[rig("NS-1")],
            &services,
            &[],
            &Palette::default(),
        );
        assert!(report.contains("### NS-1 (Alfa)\n- No interventions this year."));
        assert!(report.contains("### No rig informed\n- 01/01/2024 to 01/02/2024: 7-XYZ-1"));
    }

    #[test]
    fn schedule_report_without_a_year_is_empty() {
        let report = schedule_report(None, &[], &[], &[], &Palette::default());
        assert!(report.starts_with("# Rig Schedule\n"));
        assert!(report.contains("- 0 interventions"));
        assert!(report.contains("No interventions scheduled for this year."));
    }

    #[test]
    fn reviewers_report_shows_no_score() {
        let goals = vec![Goal {
            title: "Meta-1".to_string(),
            score: None,
            detail: None,
            sector: None,
            assignees: vec!["Ana".to_string()],
            priority: None,
            progress: Some(Progress::Other("Pausada".to_string())),
        }];
        let report = reviewers_report(&reviewers::build_reviewers(&goals), &[]);
        assert!(report.contains("## Ana"));
        assert!(report.contains("Score sem nota across 1 goals"));
        assert!(report.contains("1 goals carry no recognized progress label."));
        assert!(report.contains("| Meta-1 | - | Pausada | - | sem nota |"));
    }

    #[test]
    fn goals_report_draws_gauges() {
        let goals = vec![Goal {
            title: "Meta-1".to_string(),
            score: Some(2.5),
            detail: None,
            sector: Some("Poços".to_string()),
            assignees: vec!["Ana".to_string(), "Bruno".to_string()],
            priority: None,
            progress: None,
        }];
        let report = goals_report(&goals, &[]);
        assert!(report.contains("- Meta-1: 2.50 [#####-----] (sector Poços, assigned to Ana, Bruno)"));
    }

    #[test]
    fn reevaluation_report_formats_inventory_value() {
        let entry = ReevaluationEntry {
            rig: "NS-1".to_string(),
            well: None,
            site: None,
            service_type: None,
            task_type: None,
            description: None,
            reevaluation: Reevaluation {
                inventory_value: Some(1234.5),
                ..Reevaluation::default()
            },
        };
        let report = reevaluation_report(&[entry], &[], &Palette::default());
        assert!(report.contains("- Inventory value: R$ 1.234,50"));
        assert!(report.contains("- Applied: none applied (black)"));
    }

    #[test]
    fn data_issues_are_listed_with_one_based_rows() {
        use crate::diagnostics::FieldIssue;
        let diagnostics = vec![RecordDiagnostic {
            row: 0,
            issues: vec![FieldIssue::MissingIdentity { column: "Titulo" }],
        }];
        let report = goals_report(&[], &diagnostics);
        assert!(report.contains("No goals recorded."));
        assert!(report.contains("- row 1: Titulo: missing, row skipped"));
    }
}

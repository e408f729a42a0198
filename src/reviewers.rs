use tracing::{debug, warn};

use crate::models::{Goal, Progress, ProgressCounts, ReviewerSummary};

pub fn count_progress<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> ProgressCounts {
    goals
        .into_iter()
        .fold(ProgressCounts::default(), |mut counts, goal| {
            match &goal.progress {
                Some(Progress::InProgress) => counts.in_progress += 1,
                Some(Progress::NotStarted) => counts.not_started += 1,
                Some(Progress::Completed) => counts.completed += 1,
                Some(Progress::Other(_)) | None => counts.unrecognized += 1,
            }
            counts
        })
}

/// Mean score of the goals that carry one; `None` when none do.
pub fn average_score<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Option<f64> {
    let (total, count) = goals
        .into_iter()
        .filter_map(|goal| goal.score)
        .fold((0.0, 0usize), |(total, count), score| (total + score, count + 1));
    (count > 0).then(|| total / count as f64)
}

/// Rolls up the goals assigned to `name`.
pub fn summarize_reviewer(goals: &[Goal], name: &str) -> ReviewerSummary {
    let owned: Vec<Goal> = goals
        .iter()
        .filter(|goal| goal.assignees.iter().any(|assignee| assignee == name))
        .cloned()
        .collect();

    let counts = count_progress(&owned);
    debug!(
        reviewer = name,
        goals = owned.len(),
        recognized = counts.recognized(),
        "summarized reviewer"
    );
    if counts.unrecognized > 0 {
        warn!(
            reviewer = name,
            goals = counts.unrecognized,
            "goals without a recognized progress label"
        );
    }

    ReviewerSummary {
        name: name.to_string(),
        counts,
        average_score: average_score(&owned),
        goals: owned,
    }
}

/// One summary per distinct assignee, in order of first appearance.
pub fn build_reviewers(goals: &[Goal]) -> Vec<ReviewerSummary> {
    let mut names: Vec<&str> = Vec::new();
    for assignee in goals.iter().flat_map(|goal| &goal.assignees) {
        if !names.contains(&assignee.as_str()) {
            names.push(assignee);
        }
    }

    let summaries: Vec<_> = names
        .into_iter()
        .map(|name| summarize_reviewer(goals, name))
        .collect();
    debug!(reviewers = summaries.len(), "built reviewer summaries");
    summaries
}

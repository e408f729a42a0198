use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rig {
    pub code: String,
    pub name: Option<String>,
    pub total_capacity: Option<String>,
    pub current_capacity: Option<String>,
    pub positioning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub project: Option<String>,
    pub site: Option<String>,
}

/// One of the two independent reviewer roles on a re-evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewerSlot {
    pub name: Option<String>,
    pub was_evaluated: Option<bool>,
    pub evaluation_applied: Option<bool>,
    pub notes: Option<String>,
}

impl ReviewerSlot {
    pub fn evaluated(&self) -> bool {
        self.was_evaluated == Some(true)
    }

    pub fn applied(&self) -> bool {
        self.evaluation_applied == Some(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reevaluation {
    pub generalist: ReviewerSlot,
    pub specialist: ReviewerSlot,
    pub inventory_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotivationEffort {
    pub proposal: Option<String>,
    pub obstacles: Option<String>,
    pub lessons: Option<String>,
    pub expected_result: Option<String>,
    pub obtained_result: Option<String>,
    pub checked_by: Option<String>,
}

impl MotivationEffort {
    /// The five justification texts; `checked_by` is not one of them.
    pub fn texts(&self) -> [&Option<String>; 5] {
        [
            &self.proposal,
            &self.obstacles,
            &self.lessons,
            &self.expected_result,
            &self.obtained_result,
        ]
    }
}

/// A scheduled intervention on a rig.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// `None` when the row names no rig code.
    pub rig: Option<Rig>,
    pub project: Project,
    pub well: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: Option<f64>,
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub reevaluation: Reevaluation,
    pub motivation: MotivationEffort,
}

/// Flat row of the re-evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReevaluationEntry {
    pub rig: String,
    pub well: Option<String>,
    pub site: Option<String>,
    pub service_type: Option<String>,
    pub task_type: Option<String>,
    pub description: Option<String>,
    pub reevaluation: Reevaluation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "label", rename_all = "snake_case")]
pub enum Progress {
    InProgress,
    NotStarted,
    Completed,
    Other(String),
}

impl Progress {
    pub const IN_PROGRESS: &'static str = "Em Andamento";
    pub const NOT_STARTED: &'static str = "Não Iniciada";
    pub const COMPLETED: &'static str = "Finalizada";

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            Self::IN_PROGRESS => Progress::InProgress,
            Self::NOT_STARTED => Progress::NotStarted,
            Self::COMPLETED => Progress::Completed,
            _ => Progress::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Progress::InProgress => Self::IN_PROGRESS,
            Progress::NotStarted => Self::NOT_STARTED,
            Progress::Completed => Self::COMPLETED,
            Progress::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Goal {
    pub title: String,
    pub score: Option<f64>,
    pub detail: Option<String>,
    pub sector: Option<String>,
    pub assignees: Vec<String>,
    pub priority: Option<String>,
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressCounts {
    pub in_progress: usize,
    pub not_started: usize,
    pub completed: usize,
    /// Goals whose progress label is missing or outside the known set.
    pub unrecognized: usize,
}

impl ProgressCounts {
    pub fn recognized(&self) -> usize {
        self.in_progress + self.not_started + self.completed
    }
}

/// A person and the rolled-up statistics of the goals assigned to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerSummary {
    pub name: String,
    pub counts: ProgressCounts,
    pub goals: Vec<Goal>,
    /// `None` when no owned goal carries a score.
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Milestone {
    pub project: String,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPhase {
    pub project: String,
    pub phase: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub milestones: Vec<Milestone>,
}

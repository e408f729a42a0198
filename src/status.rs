//! Status classification of services.
//!
//! Each axis is a pure function over the sub-records it needs, so the rules
//! can be checked without building a whole service.

use serde::Serialize;

use crate::config::Palette;
use crate::models::{MotivationEffort, Reevaluation, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Complete,
    Started,
    NotReviewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationStatus {
    Complete,
    HasMotivation,
    NotReviewed,
}

/// Which reviewer evaluations were actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedMarker {
    Both,
    GeneralistOnly,
    SpecialistOnly,
    None,
}

impl ReviewStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReviewStatus::Complete => "evaluation and motivation complete",
            ReviewStatus::Started => "re-evaluation started",
            ReviewStatus::NotReviewed => "not reviewed",
        }
    }
}

impl MotivationStatus {
    pub fn label(self) -> &'static str {
        match self {
            MotivationStatus::Complete => "evaluation and motivation complete",
            MotivationStatus::HasMotivation => "motivation x effort",
            MotivationStatus::NotReviewed => "not reviewed",
        }
    }
}

impl AppliedMarker {
    pub fn label(self) -> &'static str {
        match self {
            AppliedMarker::Both => "both applied",
            AppliedMarker::GeneralistOnly => "generalist applied",
            AppliedMarker::SpecialistOnly => "specialist applied",
            AppliedMarker::None => "none applied",
        }
    }
}

/// Both reviewers evaluated and all five justification texts are present.
pub fn is_complete(reevaluation: &Reevaluation, motivation: &MotivationEffort) -> bool {
    reevaluation.generalist.evaluated()
        && reevaluation.specialist.evaluated()
        && motivation.texts().iter().all(|text| text.is_some())
}

pub fn review_status(reevaluation: &Reevaluation, motivation: &MotivationEffort) -> ReviewStatus {
    if is_complete(reevaluation, motivation) {
        ReviewStatus::Complete
    } else if reevaluation.generalist.evaluated() || reevaluation.specialist.evaluated() {
        ReviewStatus::Started
    } else {
        ReviewStatus::NotReviewed
    }
}

pub fn motivation_status(
    reevaluation: &Reevaluation,
    motivation: &MotivationEffort,
) -> MotivationStatus {
    if is_complete(reevaluation, motivation) {
        MotivationStatus::Complete
    } else if motivation.texts().iter().any(|text| text.is_some()) {
        MotivationStatus::HasMotivation
    } else {
        MotivationStatus::NotReviewed
    }
}

pub fn applied_marker(reevaluation: &Reevaluation) -> AppliedMarker {
    match (
        reevaluation.generalist.applied(),
        reevaluation.specialist.applied(),
    ) {
        (true, true) => AppliedMarker::Both,
        (true, false) => AppliedMarker::GeneralistOnly,
        (false, true) => AppliedMarker::SpecialistOnly,
        (false, false) => AppliedMarker::None,
    }
}

impl Palette {
    pub fn review_color(&self, status: ReviewStatus) -> &str {
        match status {
            ReviewStatus::Complete => &self.status.complete,
            ReviewStatus::Started => &self.status.started,
            ReviewStatus::NotReviewed => &self.status.not_reviewed,
        }
    }

    pub fn motivation_color(&self, status: MotivationStatus) -> &str {
        match status {
            MotivationStatus::Complete => &self.status.complete,
            MotivationStatus::HasMotivation => &self.status.motivation,
            MotivationStatus::NotReviewed => &self.status.not_reviewed,
        }
    }

    pub fn marker_color(&self, marker: AppliedMarker) -> &str {
        match marker {
            AppliedMarker::Both => &self.marker.both,
            AppliedMarker::GeneralistOnly => &self.marker.generalist,
            AppliedMarker::SpecialistOnly => &self.marker.specialist,
            AppliedMarker::None => &self.marker.none,
        }
    }
}

/// All classifier outcomes for one service, with their color tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub review: ReviewStatus,
    pub motivation: MotivationStatus,
    pub applied: AppliedMarker,
    pub review_color: String,
    pub motivation_color: String,
    pub marker_color: String,
}

pub fn classify(service: &Service, palette: &Palette) -> Classification {
    let review = review_status(&service.reevaluation, &service.motivation);
    let motivation = motivation_status(&service.reevaluation, &service.motivation);
    let applied = applied_marker(&service.reevaluation);
    Classification {
        review,
        motivation,
        applied,
        review_color: palette.review_color(review).to_string(),
        motivation_color: palette.motivation_color(motivation).to_string(),
        marker_color: palette.marker_color(applied).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewerSlot;
    use pretty_assertions::assert_eq;

    fn slot(evaluated: Option<bool>, applied: Option<bool>) -> ReviewerSlot {
        ReviewerSlot {
            name: None,
            was_evaluated: evaluated,
            evaluation_applied: applied,
            notes: None,
        }
    }

    fn reevaluation(generalist: ReviewerSlot, specialist: ReviewerSlot) -> Reevaluation {
        Reevaluation {
            generalist,
            specialist,
            inventory_value: None,
        }
    }

    fn full_motivation() -> MotivationEffort {
        MotivationEffort {
            proposal: Some("proposta".into()),
            obstacles: Some("obstáculos".into()),
            lessons: Some("lições".into()),
            expected_result: Some("esperado".into()),
            obtained_result: Some("obtido".into()),
            checked_by: None,
        }
    }

    #[test]
    fn complete_on_both_axes_regardless_of_applied_flags() {
        let motivation = full_motivation();
        for applied in [None, Some(false), Some(true)] {
            let re = reevaluation(slot(Some(true), applied), slot(Some(true), None));
            assert_eq!(review_status(&re, &motivation), ReviewStatus::Complete);
            assert_eq!(motivation_status(&re, &motivation), MotivationStatus::Complete);
        }
    }

    #[test]
    fn nothing_evaluated_nor_written_is_not_reviewed_on_both_axes() {
        let re = reevaluation(slot(Some(false), Some(true)), slot(Some(false), None));
        let motivation = MotivationEffort::default();
        assert_eq!(review_status(&re, &motivation), ReviewStatus::NotReviewed);
        assert_eq!(motivation_status(&re, &motivation), MotivationStatus::NotReviewed);
    }

    #[test]
    fn one_evaluated_slot_means_started() {
        let re = reevaluation(slot(None, None), slot(Some(true), None));
        assert_eq!(review_status(&re, &full_motivation()), ReviewStatus::Started);
    }

    #[test]
    fn one_missing_text_breaks_completeness() {
        let re = reevaluation(slot(Some(true), None), slot(Some(true), None));
        let motivation = MotivationEffort {
            lessons: None,
            ..full_motivation()
        };
        assert_eq!(review_status(&re, &motivation), ReviewStatus::Started);
        assert_eq!(motivation_status(&re, &motivation), MotivationStatus::HasMotivation);
    }

    #[test]
    fn checked_by_alone_is_not_motivation() {
        let re = Reevaluation::default();
        let motivation = MotivationEffort {
            checked_by: Some("Ana".into()),
            ..MotivationEffort::default()
        };
        assert_eq!(motivation_status(&re, &motivation), MotivationStatus::NotReviewed);
    }

    #[test]
    fn any_text_means_has_motivation() {
        let re = Reevaluation::default();
        let motivation = MotivationEffort {
            obtained_result: Some(String::new()),
            ..MotivationEffort::default()
        };
        assert_eq!(motivation_status(&re, &motivation), MotivationStatus::HasMotivation);
    }

    #[test]
    fn applied_marker_reads_each_slot_independently() {
        let cases = [
            (Some(true), Some(true), AppliedMarker::Both),
            (Some(true), Some(false), AppliedMarker::GeneralistOnly),
            (None, Some(true), AppliedMarker::SpecialistOnly),
            (Some(false), None, AppliedMarker::None),
        ];
        for (generalist, specialist, expected) in cases {
            let re = reevaluation(slot(None, generalist), slot(None, specialist));
            assert_eq!(applied_marker(&re), expected);
        }
    }

    #[test]
    fn applied_marker_ignores_was_evaluated() {
        let re = reevaluation(slot(Some(true), Some(false)), slot(Some(true), None));
        assert_eq!(applied_marker(&re), AppliedMarker::None);
    }

    #[test]
    fn palette_tokens_follow_the_outcome() {
        let palette = Palette::default();
        assert_eq!(palette.review_color(ReviewStatus::Complete), "#008000");
        assert_eq!(palette.review_color(ReviewStatus::Started), "#ff5d27ff");
        assert_eq!(palette.motivation_color(MotivationStatus::HasMotivation), "#0e1fa3ff");
        assert_eq!(palette.motivation_color(MotivationStatus::NotReviewed), "#d3d3d3");
        assert_eq!(palette.marker_color(AppliedMarker::GeneralistOnly), "yellow");
        assert_eq!(palette.marker_color(AppliedMarker::SpecialistOnly), "green");
    }
}

//! Pipeline result types.

use crate::activity::{ActivityResult, ActivityStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The overall outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every executed step succeeded.
    Success,
    /// At least one executed step failed.
    Failure,
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// One entry in a pipeline's ordered step list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStep {
    /// The activity name the step dispatched to.
    pub activity: String,
    /// The step's result.
    pub result: ActivityResult,
}

impl PipelineStep {
    /// Creates a new step record.
    #[must_use]
    pub fn new(activity: impl Into<String>, result: ActivityResult) -> Self {
        Self {
            activity: activity.into(),
            result,
        }
    }
}

/// The ordered, report-ready outcome of one pipeline run.
///
/// `outcome` says whether everything that ran succeeded; `complete` says
/// whether everything ran. The two are deliberately separate so "all that
/// ran succeeded" is never conflated with "everything ran".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Unique identifier of this run.
    pub run_id: Uuid,

    /// Name of the context that governed the run.
    pub context: String,

    /// Description of the target the run operated on.
    pub target: String,

    /// Step records in execution order.
    pub steps: Vec<PipelineStep>,

    /// Overall outcome: success iff every executed step succeeded.
    pub outcome: PipelineOutcome,

    /// False when any step was skipped (stop-on-error cut the run short).
    pub complete: bool,

    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: f64,

    /// ISO 8601 timestamp of when the run started.
    pub started_at: String,
}

impl PipelineResult {
    /// Looks up a step's result by activity name.
    #[must_use]
    pub fn step(&self, activity: &str) -> Option<&ActivityResult> {
        self.steps
            .iter()
            .find(|s| s.activity == activity)
            .map(|s| &s.result)
    }

    /// Returns the number of steps with the given status.
    #[must_use]
    pub fn count_with_status(&self, status: ActivityStatus) -> usize {
        self.steps
            .iter()
            .filter(|s| s.result.status == status)
            .count()
    }

    /// Returns true if the run succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == PipelineOutcome::Success
    }

    /// Derives the overall outcome from a step list: success iff every
    /// executed step succeeded. Skipped steps do not count against success;
    /// they only mark the run incomplete.
    #[must_use]
    pub fn outcome_of(steps: &[PipelineStep]) -> PipelineOutcome {
        let any_failed = steps
            .iter()
            .any(|s| s.result.status == ActivityStatus::Failure);
        if any_failed {
            PipelineOutcome::Failure
        } else {
            PipelineOutcome::Success
        }
    }

    /// Derives completeness from a step list: complete iff no step was
    /// skipped.
    #[must_use]
    pub fn completeness_of(steps: &[PipelineStep]) -> bool {
        !steps
            .iter()
            .any(|s| s.result.status == ActivityStatus::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{generate_run_id, iso_timestamp};

    fn result_with(steps: Vec<PipelineStep>) -> PipelineResult {
        let outcome = PipelineResult::outcome_of(&steps);
        let complete = PipelineResult::completeness_of(&steps);
        PipelineResult {
            run_id: generate_run_id(),
            context: "general-analyst".to_string(),
            target: "/some/path".to_string(),
            steps,
            outcome,
            complete,
            duration_ms: 1.0,
            started_at: iso_timestamp(),
        }
    }

    #[test]
    fn test_all_success() {
        let result = result_with(vec![
            PipelineStep::new("analyze", ActivityResult::success_empty()),
            PipelineStep::new("document", ActivityResult::success_empty()),
        ]);

        assert_eq!(result.outcome, PipelineOutcome::Success);
        assert!(result.complete);
    }

    #[test]
    fn test_failure_with_complete_run() {
        let result = result_with(vec![
            PipelineStep::new("analyze", ActivityResult::success_empty()),
            PipelineStep::new("document", ActivityResult::failure("boom")),
        ]);

        assert_eq!(result.outcome, PipelineOutcome::Failure);
        assert!(result.complete);
    }

    #[test]
    fn test_skip_marks_incomplete() {
        let result = result_with(vec![
            PipelineStep::new("analyze", ActivityResult::failure("boom")),
            PipelineStep::new("document", ActivityResult::skipped()),
        ]);

        assert_eq!(result.outcome, PipelineOutcome::Failure);
        assert!(!result.complete);
        assert_eq!(result.count_with_status(ActivityStatus::Skipped), 1);
    }

    #[test]
    fn test_step_lookup() {
        let result = result_with(vec![PipelineStep::new(
            "analyze",
            ActivityResult::success_metric("filesSeen", serde_json::json!(3)),
        )]);

        let step = result.step("analyze").unwrap();
        assert_eq!(step.summary.get("filesSeen"), Some(&serde_json::json!(3)));
        assert!(result.step("missing").is_none());
    }
}

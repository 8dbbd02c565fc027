//! Folding a pipeline result into a report-ready payload.

use crate::activity::{ActivityResult, ActivityStatus};
use crate::pipeline::{PipelineOutcome, PipelineResult};
use crate::utils::iso_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A failed step, surfaced for the report's failure section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStep {
    /// Activity name.
    pub activity: String,
    /// Error detail.
    pub error: String,
}

/// The caller-facing summary handed to the external renderer.
///
/// The aggregator derives lightweight cross-activity aggregates without
/// reinterpreting individual activity semantics: it does not know what
/// "analyze" means, only that it produced a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Identifier of the aggregated run.
    pub run_id: Uuid,

    /// Context that governed the run.
    pub context: String,

    /// Target the run operated on.
    pub target: String,

    /// Overall outcome copied from the pipeline result.
    pub outcome: PipelineOutcome,

    /// False when the pipeline was cut short; the renderer is expected to
    /// mark such reports as partial.
    pub complete: bool,

    /// Total number of steps, executed or not.
    pub total_steps: usize,

    /// Steps that ran and succeeded.
    pub succeeded: usize,

    /// Steps that ran and failed.
    pub failed: usize,

    /// Steps that never ran.
    pub skipped: usize,

    /// Failed steps with their error detail, in step order.
    pub failures: Vec<FailedStep>,

    /// Every artifact reference produced, concatenated in step order.
    pub artifacts: Vec<String>,

    /// Per-activity metric summaries, keyed by activity name.
    pub summaries: HashMap<String, HashMap<String, serde_json::Value>>,

    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: f64,

    /// ISO 8601 timestamp of aggregation.
    pub generated_at: String,
}

/// Folds per-activity outcomes into one report payload.
///
/// Pure and total: malformed activity results are normalized defensively
/// instead of propagating an error, since this stage sits just before the
/// hand-off to an external renderer a caller cannot easily recover from
/// mid-render. A failure without detail gets a synthetic message; a
/// "success" carrying error detail is counted as a failure.
#[must_use]
pub fn aggregate(result: &PipelineResult) -> ReportPayload {
    let mut succeeded = 0;
    let mut failed = 0;
    let mut skipped = 0;
    let mut failures = Vec::new();
    let mut artifacts = Vec::new();
    let mut summaries = HashMap::new();

    for step in &result.steps {
        match normalize(&step.result) {
            Normalized::Success => {
                succeeded += 1;
                if !step.result.summary.is_empty() {
                    summaries.insert(step.activity.clone(), step.result.summary.clone());
                }
            }
            Normalized::Failure(error) => {
                failed += 1;
                failures.push(FailedStep {
                    activity: step.activity.clone(),
                    error,
                });
            }
            Normalized::Skipped => skipped += 1,
        }
        artifacts.extend(step.result.artifacts.iter().cloned());
    }

    ReportPayload {
        run_id: result.run_id,
        context: result.context.clone(),
        target: result.target.clone(),
        outcome: result.outcome,
        complete: result.complete,
        total_steps: result.steps.len(),
        succeeded,
        failed,
        skipped,
        failures,
        artifacts,
        summaries,
        duration_ms: result.duration_ms,
        generated_at: iso_timestamp(),
    }
}

enum Normalized {
    Success,
    Failure(String),
    Skipped,
}

fn normalize(result: &ActivityResult) -> Normalized {
    match result.status {
        ActivityStatus::Success => match &result.error {
            // A "success" carrying error detail is malformed by
            // construction; count it as the failure it reports.
            Some(error) => Normalized::Failure(error.clone()),
            None => Normalized::Success,
        },
        ActivityStatus::Failure => Normalized::Failure(
            result
                .error
                .clone()
                .unwrap_or_else(|| "activity reported failure without detail".to_string()),
        ),
        ActivityStatus::Skipped => Normalized::Skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineStep;
    use crate::utils::generate_run_id;
    use pretty_assertions::assert_eq;

    fn pipeline_result(steps: Vec<PipelineStep>) -> PipelineResult {
        let outcome = PipelineResult::outcome_of(&steps);
        let complete = PipelineResult::completeness_of(&steps);
        PipelineResult {
            run_id: generate_run_id(),
            context: "general-analyst".to_string(),
            target: "/some/path".to_string(),
            steps,
            outcome,
            complete,
            duration_ms: 12.5,
            started_at: iso_timestamp(),
        }
    }

    #[test]
    fn test_aggregate_counts_and_artifacts() {
        let result = pipeline_result(vec![
            PipelineStep::new(
                "analyze",
                ActivityResult::success_metric("filesSeen", serde_json::json!(3))
                    .with_artifact("analysis.json"),
            ),
            PipelineStep::new(
                "document",
                ActivityResult::failure("renderer unavailable").with_artifact("partial.json"),
            ),
            PipelineStep::new("publish", ActivityResult::skipped()),
        ]);

        let payload = aggregate(&result);

        assert_eq!(payload.total_steps, 3);
        assert_eq!(payload.succeeded, 1);
        assert_eq!(payload.failed, 1);
        assert_eq!(payload.skipped, 1);
        assert_eq!(payload.artifacts, vec!["analysis.json", "partial.json"]);
        assert_eq!(
            payload.failures,
            vec![FailedStep {
                activity: "document".to_string(),
                error: "renderer unavailable".to_string(),
            }]
        );
        assert_eq!(
            payload.summaries.get("analyze").unwrap().get("filesSeen"),
            Some(&serde_json::json!(3))
        );
    }

    #[test]
    fn test_failure_without_detail_gets_synthetic_message() {
        let mut bare = ActivityResult::failure("x");
        bare.error = None;
        let payload = aggregate(&pipeline_result(vec![PipelineStep::new("odd", bare)]));

        assert_eq!(payload.failed, 1);
        assert_eq!(
            payload.failures[0].error,
            "activity reported failure without detail"
        );
    }

    #[test]
    fn test_success_with_error_detail_is_demoted() {
        let mut odd = ActivityResult::success_empty();
        odd.error = Some("claims success, reports error".to_string());
        let payload = aggregate(&pipeline_result(vec![PipelineStep::new("odd", odd)]));

        assert_eq!(payload.succeeded, 0);
        assert_eq!(payload.failed, 1);
    }

    #[test]
    fn test_incomplete_run_still_aggregates() {
        let result = pipeline_result(vec![
            PipelineStep::new("analyze", ActivityResult::failure("boom")),
            PipelineStep::new("document", ActivityResult::skipped()),
        ]);

        let payload = aggregate(&result);
        assert!(!payload.complete);
        assert_eq!(payload.total_steps, 2);
    }

    #[test]
    fn test_payload_serializes() {
        let payload = aggregate(&pipeline_result(vec![PipelineStep::new(
            "analyze",
            ActivityResult::success_empty(),
        )]));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["context"], "general-analyst");
        assert_eq!(json["outcome"], "success");
    }
}

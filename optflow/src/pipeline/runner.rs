//! Sequential pipeline execution under the active context's policy.

use super::{PipelineOptions, PipelineResult, PipelineStep};
use crate::activity::{ActivityOptions, ActivityRegistry, ActivityResult};
use crate::catalog::Context;
use crate::errors::{EngineError, EngineResult};
use crate::session::ContextManager;
use crate::target::Target;
use crate::utils::{generate_run_id, iso_timestamp};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Executes a single activity or an ordered pipeline of activities against
/// a target, honoring the active context's enabled-activity allowlist.
///
/// The runner reads the active context exactly once at the start of each
/// call and uses that captured reference for the entire run, so a context
/// switch racing with an in-flight pipeline never changes which context
/// governs it.
///
/// The runner defines no cancellation or timeout of its own: a hung
/// activity handle blocks the remainder of the pipeline.
pub struct PipelineRunner {
    manager: Arc<ContextManager>,
    registry: Arc<ActivityRegistry>,
}

impl PipelineRunner {
    /// Creates a runner over a session manager and an activity registry.
    #[must_use]
    pub fn new(manager: Arc<ContextManager>, registry: Arc<ActivityRegistry>) -> Self {
        Self { manager, registry }
    }

    /// Runs one activity against a target under the active context.
    ///
    /// The allowlist gate runs before the registry lookup and before any
    /// dispatch: a disallowed activity's handle is never invoked.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`] before `initialize`;
    /// [`EngineError::NotEnabled`] when the context's allowlist rejects the
    /// name; [`EngineError::NotFound`] when the name is allowlisted but
    /// unbound in the registry (a configuration inconsistency). A failure
    /// *inside* the handle is not an error: it comes back as a failure
    /// [`ActivityResult`].
    pub async fn run_activity(
        &self,
        name: &str,
        target: &Target,
        options: &ActivityOptions,
    ) -> EngineResult<ActivityResult> {
        let context = self.manager.current()?;
        self.run_activity_under(&context, name, target, options)
            .await
    }

    /// Runs the active context's enabled activities, in their declared
    /// order, against a target.
    ///
    /// Default policy: continue past a failing step, collecting its failure.
    /// With [`PipelineOptions::stop_on_error`] the run halts after the first
    /// failure and every unexecuted step is recorded as skipped.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`] before `initialize`;
    /// [`EngineError::NotFound`] when an allowlisted activity is unbound.
    /// Activity failures never surface as errors.
    pub async fn run_pipeline(
        &self,
        target: &Target,
        options: &PipelineOptions,
    ) -> EngineResult<PipelineResult> {
        // Capture once; the rest of the run ignores the live session.
        let context = self.manager.current()?;
        self.run_pipeline_under(&context, target, options).await
    }

    /// Runs a pipeline under an explicitly captured context.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] when an allowlisted activity is unbound in
    /// the registry.
    pub async fn run_pipeline_under(
        &self,
        context: &Arc<Context>,
        target: &Target,
        options: &PipelineOptions,
    ) -> EngineResult<PipelineResult> {
        let run_id = generate_run_id();
        let started_at = iso_timestamp();
        let start = Instant::now();

        info!(
            %run_id,
            context = %context.name,
            target = %target.describe(),
            steps = context.enabled_activities.len(),
            "pipeline started"
        );

        let mut steps: Vec<PipelineStep> = Vec::with_capacity(context.enabled_activities.len());
        let mut halted = false;

        for name in &context.enabled_activities {
            if halted {
                steps.push(PipelineStep::new(name.clone(), ActivityResult::skipped()));
                continue;
            }

            let result = self
                .run_activity_under(context, name, target, &options.activity)
                .await?;

            if !result.is_success() && options.stop_on_error {
                halted = true;
            }
            steps.push(PipelineStep::new(name.clone(), result));
        }

        let outcome = PipelineResult::outcome_of(&steps);
        let complete = PipelineResult::completeness_of(&steps);
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            %run_id,
            %outcome,
            complete,
            duration_ms,
            "pipeline finished"
        );

        Ok(PipelineResult {
            run_id,
            context: context.name.clone(),
            target: target.describe(),
            steps,
            outcome,
            complete,
            duration_ms,
            started_at,
        })
    }

    /// Gate, resolve, dispatch, contain.
    async fn run_activity_under(
        &self,
        context: &Arc<Context>,
        name: &str,
        target: &Target,
        options: &ActivityOptions,
    ) -> EngineResult<ActivityResult> {
        if !context.is_enabled(name) {
            return Err(EngineError::not_enabled(name, &context.name));
        }

        // Allowlisted but unbound: catalog validation should have caught
        // this, so reaching it means registry and catalog disagree.
        let handle = self
            .registry
            .resolve(name)
            .ok_or_else(|| EngineError::activity_not_found(name))?;

        let resolved = options.resolved_against(context.analysis_depth);
        let start = Instant::now();

        let result = match handle.execute(target, &resolved).await {
            Ok(result) => result,
            // A failing activity must never crash the orchestrator:
            // contain the error as a failure result.
            Err(e) => ActivityResult::failure(e.to_string()),
        };
        let result = result.with_duration_ms(start.elapsed().as_secs_f64() * 1000.0);

        match result.status {
            crate::activity::ActivityStatus::Failure => {
                warn!(
                    activity = name,
                    error = result.error.as_deref().unwrap_or(""),
                    "activity failed"
                );
            }
            _ => {
                info!(
                    activity = name,
                    status = %result.status,
                    duration_ms = result.duration_ms,
                    "activity finished"
                );
            }
        }

        Ok(result)
    }
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("registry", &self.registry)
            .finish()
    }
}

//! The orchestrator: wiring and caller-facing operations.

use super::EngineStatus;
use crate::acquire::{resolve_checkout_root, RepoSource, RepositoryAcquirer};
use crate::activity::{ActivityOptions, ActivityRegistry, ActivityResult};
use crate::catalog::{Context, ContextStore};
use crate::errors::EngineResult;
use crate::pipeline::{PipelineOptions, PipelineResult, PipelineRunner};
use crate::report::{aggregate, ReportPayload};
use crate::session::ContextManager;
use crate::target::Target;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Wires the store, session manager, registry and runner together and
/// exposes the engine's operations to command-line and IPC surfaces.
pub struct Orchestrator {
    manager: Arc<ContextManager>,
    registry: Arc<ActivityRegistry>,
    runner: PipelineRunner,
}

impl Orchestrator {
    /// Creates an orchestrator over a loaded store and a populated
    /// registry. No context is active until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(store: ContextStore, registry: Arc<ActivityRegistry>) -> Self {
        let manager = Arc::new(ContextManager::new(store));
        let runner = PipelineRunner::new(manager.clone(), registry.clone());
        Self {
            manager,
            registry,
            runner,
        }
    }

    /// Activates the named context, or the catalog default.
    ///
    /// # Errors
    ///
    /// See [`ContextManager::initialize`].
    pub fn initialize(&self, name: Option<&str>) -> EngineResult<Arc<Context>> {
        self.manager.initialize(name)
    }

    /// Switches the active context.
    ///
    /// # Errors
    ///
    /// See [`ContextManager::switch_context`].
    pub fn switch_context(&self, name: &str) -> EngineResult<Arc<Context>> {
        self.manager.switch_context(name)
    }

    /// Lists every loaded context.
    #[must_use]
    pub fn list_contexts(&self) -> Vec<Arc<Context>> {
        self.manager.list_available()
    }

    /// Returns the active context.
    ///
    /// # Errors
    ///
    /// See [`ContextManager::current`].
    pub fn current_context(&self) -> EngineResult<Arc<Context>> {
        self.manager.current()
    }

    /// Runs one activity against a target under the active context.
    ///
    /// # Errors
    ///
    /// See [`PipelineRunner::run_activity`].
    pub async fn run_activity(
        &self,
        name: &str,
        target: &Target,
        options: &ActivityOptions,
    ) -> EngineResult<ActivityResult> {
        self.runner.run_activity(name, target, options).await
    }

    /// Runs the active context's pipeline against a target.
    ///
    /// # Errors
    ///
    /// See [`PipelineRunner::run_pipeline`].
    pub async fn run_pipeline(
        &self,
        target: &Target,
        options: &PipelineOptions,
    ) -> EngineResult<PipelineResult> {
        self.runner.run_pipeline(target, options).await
    }

    /// Acquires a repository, then runs the pipeline against the checkout.
    ///
    /// Acquisition failures short-circuit: no pipeline step runs unless the
    /// target materialized.
    ///
    /// # Errors
    ///
    /// [`crate::errors::EngineError::Acquisition`] when the collaborator
    /// fails to materialize the checkout, plus everything
    /// [`run_pipeline`](Self::run_pipeline) can return.
    pub async fn acquire_and_run_pipeline(
        &self,
        acquirer: &dyn RepositoryAcquirer,
        source: &RepoSource,
        workdir: &Path,
        options: &PipelineOptions,
    ) -> EngineResult<PipelineResult> {
        let checkout = acquirer.acquire(source, workdir).await?;
        let root = resolve_checkout_root(&checkout);
        info!(source = %source, root = %root.display(), "repository acquired");

        let target = Target::checkout(root, source.url.clone());
        self.run_pipeline(&target, options).await
    }

    /// Folds a pipeline result into the report payload.
    #[must_use]
    pub fn aggregate(&self, result: &PipelineResult) -> ReportPayload {
        aggregate(result)
    }

    /// Returns a snapshot of wiring and session state.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        let active_context = self.manager.current().ok().map(|c| c.name.clone());
        EngineStatus {
            initialized: active_context.is_some(),
            active_context,
            available_contexts: self
                .manager
                .list_available()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            registered_activities: self.registry.names(),
        }
    }

    /// The session manager, for callers that need direct access.
    #[must_use]
    pub fn manager(&self) -> &Arc<ContextManager> {
        &self.manager
    }

    /// The activity registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ActivityRegistry> {
        &self.registry
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("manager", &self.manager)
            .field("registry", &self.registry)
            .finish()
    }
}

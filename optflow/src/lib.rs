//! # Optflow
//!
//! A context and pipeline orchestration engine for configuration-driven
//! analysis runs.
//!
//! Optflow loads a catalog of named **contexts** (bundles of focus areas,
//! enabled activities, prompt and template identifiers), activates one at a
//! time, and runs named **activities** against a target — a local path or
//! an acquired repository checkout — either individually or as a sequential
//! pipeline governed by the active context's allowlist:
//!
//! - **Context catalog**: validated, all-or-nothing loading of context
//!   definitions
//! - **Activity registry**: late binding of names to capability handles
//! - **Session management**: one active context, switchable at runtime
//!   without restart
//! - **Pipeline execution**: declared-order sequencing with a
//!   continue-or-stop failure policy
//! - **Result aggregation**: one report-ready payload per run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use optflow::prelude::*;
//!
//! let registry = Arc::new(ActivityRegistry::new());
//! registry.register(Arc::new(MyAnalyzeActivity::new()))?;
//!
//! let store = ContextStore::load_from_path("contexts.json", &registry.name_set())?;
//! let engine = Orchestrator::new(store, registry);
//!
//! engine.initialize(Some("general-analyst"))?;
//! let result = engine.run_pipeline(&Target::path("/repo"), &PipelineOptions::new()).await?;
//! let payload = engine.aggregate(&result);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod acquire;
pub mod activity;
pub mod catalog;
pub mod errors;
pub mod observability;
pub mod orchestrator;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod target;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::acquire::{RepoSource, RepositoryAcquirer};
    pub use crate::activity::{
        Activity, ActivityOptions, ActivityRegistry, ActivityResult, ActivityStatus, OptionSpec,
    };
    pub use crate::catalog::{AnalysisDepth, Context, ContextStore};
    pub use crate::errors::{EngineError, EngineResult};
    pub use crate::orchestrator::{EngineStatus, Orchestrator};
    pub use crate::pipeline::{
        PipelineOptions, PipelineOutcome, PipelineResult, PipelineRunner, PipelineStep,
    };
    pub use crate::report::{aggregate, ReportPayload, ReportRenderer};
    pub use crate::session::ContextManager;
    pub use crate::target::Target;
    pub use crate::utils::{generate_run_id, iso_timestamp, Timestamp};
}

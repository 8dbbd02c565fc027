//! Activity trait and supporting types.
//!
//! Activities are the units of work a pipeline dispatches to. Each is an
//! external capability bound to a name in the [`ActivityRegistry`]; the
//! engine knows nothing about what an activity does, only that it conforms
//! to [`Activity::execute`].

mod options;
mod registry;
mod result;

pub use options::ActivityOptions;
pub use registry::ActivityRegistry;
pub use result::{ActivityResult, ActivityStatus};

use crate::target::Target;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A declared option an activity recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option name as it appears in [`ActivityOptions`].
    pub name: String,
    /// What the option does.
    pub effect: String,
    /// Default applied when the option is absent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl OptionSpec {
    /// Creates a new option declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: effect.into(),
            default: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A named, independently invocable capability handle.
///
/// Implementations must not assume any other activity ran first, and must
/// be safely re-runnable against the same target: the orchestrator relies on
/// idempotence with respect to the target's read-only view when a caller
/// re-runs a pipeline.
///
/// Returning `Err` is the escape hatch for collaborator code that fails
/// outside its own result reporting; the pipeline runner converts it into a
/// failure [`ActivityResult`] rather than letting it cross the pipeline
/// boundary.
#[async_trait]
pub trait Activity: Send + Sync + Debug {
    /// Returns the unique name the activity is registered under.
    fn name(&self) -> &str;

    /// Declares the options this activity recognizes.
    ///
    /// Every activity at least understands `output` and `depth`; the
    /// default declaration covers those two.
    fn declared_options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::new("output", "destination directory for produced artifacts"),
            OptionSpec::new("depth", "analysis depth").with_default("the context's depth"),
        ]
    }

    /// Executes the activity against a target.
    async fn execute(
        &self,
        target: &Target,
        options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult>;
}

/// A function-based activity, convenient for wiring and tests.
pub struct FnActivity<F>
where
    F: Fn(&Target, &ActivityOptions) -> anyhow::Result<ActivityResult> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnActivity<F>
where
    F: Fn(&Target, &ActivityOptions) -> anyhow::Result<ActivityResult> + Send + Sync,
{
    /// Creates a new function-based activity.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnActivity<F>
where
    F: Fn(&Target, &ActivityOptions) -> anyhow::Result<ActivityResult> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnActivity").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Activity for FnActivity<F>
where
    F: Fn(&Target, &ActivityOptions) -> anyhow::Result<ActivityResult> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        target: &Target,
        options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        (self.func)(target, options)
    }
}

/// An activity that succeeds without doing anything.
#[derive(Debug, Clone)]
pub struct NoOpActivity {
    name: String,
}

impl NoOpActivity {
    /// Creates a new no-op activity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Activity for NoOpActivity {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        _target: &Target,
        _options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        Ok(ActivityResult::success_empty())
    }
}

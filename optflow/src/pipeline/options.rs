//! Options governing a pipeline run.

use crate::activity::ActivityOptions;
use serde::{Deserialize, Serialize};

/// Options for one pipeline invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// When set, the pipeline halts after the first failing step and marks
    /// every unexecuted step as skipped. The default is to continue past
    /// failures so one broken analysis does not block the others — the
    /// report favors completeness over fail-fast.
    #[serde(default)]
    pub stop_on_error: bool,

    /// Options forwarded to every activity handle.
    #[serde(default)]
    pub activity: ActivityOptions,
}

impl PipelineOptions {
    /// Creates default options (continue on error).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the stop-on-error policy.
    #[must_use]
    pub fn stop_on_error(mut self) -> Self {
        self.stop_on_error = true;
        self
    }

    /// Sets the per-activity options.
    #[must_use]
    pub fn with_activity_options(mut self, activity: ActivityOptions) -> Self {
        self.activity = activity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_continues_on_error() {
        assert!(!PipelineOptions::new().stop_on_error);
    }

    #[test]
    fn test_stop_on_error_builder() {
        assert!(PipelineOptions::new().stop_on_error().stop_on_error);
    }
}

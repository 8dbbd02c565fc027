//! Options passed to activity handles.

use crate::catalog::AnalysisDepth;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Options recognized by every activity handle.
///
/// `output` and `depth` are the contract minimum; anything else an activity
/// understands travels in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityOptions {
    /// Destination directory for produced artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Analysis depth. When unset, the pipeline runner fills in the
    /// governing context's depth before dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<AnalysisDepth>,

    /// Free-form per-activity options.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ActivityOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the artifact destination.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the analysis depth explicitly, overriding the context's.
    #[must_use]
    pub fn with_depth(mut self, depth: AnalysisDepth) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Adds a free-form option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns a copy with `depth` defaulted to the given value when unset.
    #[must_use]
    pub fn resolved_against(&self, context_depth: AnalysisDepth) -> Self {
        let mut resolved = self.clone();
        if resolved.depth.is_none() {
            resolved.depth = Some(context_depth);
        }
        resolved
    }
}

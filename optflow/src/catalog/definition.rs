//! Context definition records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How deeply activities should inspect a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    /// Surface-level pass over the target.
    Shallow,
    /// The default balance of coverage and cost.
    #[default]
    Standard,
    /// Exhaustive inspection.
    Deep,
}

impl fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shallow => write!(f, "shallow"),
            Self::Standard => write!(f, "standard"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

/// A named bundle of focus areas, enabled activities and output preferences
/// that governs one orchestration session.
///
/// Contexts are plain data consumed by control flow: enabling or disabling
/// an activity is a catalog edit, never a code branch. The order of
/// `enabled_activities` is the pipeline execution order — a configuration
/// contract, not derived at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Unique context name.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Ordered focus tags (e.g. "architecture", "data-flow").
    #[serde(default)]
    pub focus_areas: Vec<String>,

    /// Ordered allowlist of activity names this context may run.
    pub enabled_activities: Vec<String>,

    /// Identifier of the prompt bundle collaborators should load.
    #[serde(default)]
    pub prompt_bundle: String,

    /// Identifier of the output template the report renderer should use.
    #[serde(default)]
    pub output_template: String,

    /// Analysis depth forwarded to every activity handle.
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,
}

impl Context {
    /// Returns true if the named activity is on this context's allowlist.
    #[must_use]
    pub fn is_enabled(&self, activity: &str) -> bool {
        self.enabled_activities.iter().any(|a| a == activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_display() {
        assert_eq!(AnalysisDepth::Shallow.to_string(), "shallow");
        assert_eq!(AnalysisDepth::Standard.to_string(), "standard");
        assert_eq!(AnalysisDepth::Deep.to_string(), "deep");
    }

    #[test]
    fn test_depth_default_is_standard() {
        assert_eq!(AnalysisDepth::default(), AnalysisDepth::Standard);
    }

    #[test]
    fn test_depth_serializes_snake_case() {
        let json = serde_json::to_string(&AnalysisDepth::Deep).unwrap();
        assert_eq!(json, r#""deep""#);
    }

    #[test]
    fn test_context_deserializes_with_defaults() {
        let ctx: Context = serde_json::from_str(
            r#"{"name": "review", "enabled_activities": ["analyze"]}"#,
        )
        .unwrap();

        assert_eq!(ctx.name, "review");
        assert_eq!(ctx.analysis_depth, AnalysisDepth::Standard);
        assert!(ctx.focus_areas.is_empty());
        assert!(ctx.is_enabled("analyze"));
        assert!(!ctx.is_enabled("optimize"));
    }
}

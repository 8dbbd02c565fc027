//! Activity result type with factory methods.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The outcome of one activity execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Activity completed successfully.
    Success,
    /// Activity ran and failed.
    Failure,
    /// Activity never ran because an earlier step failed under the
    /// stop-on-error policy.
    Skipped,
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl ActivityStatus {
    /// Returns true if the status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true if the status indicates failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Returns true if the activity actually ran.
    #[must_use]
    pub fn was_executed(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// The structured outcome an activity hands back to the pipeline.
///
/// Immutable once created; use the factory constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResult {
    /// The outcome tag.
    pub status: ActivityStatus,

    /// Named metrics produced by the activity.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub summary: HashMap<String, serde_json::Value>,

    /// References to artifacts owned by the external renderer
    /// (paths or identifiers).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,

    /// Error detail when the outcome is a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock duration of the execution in milliseconds. Zero for
    /// skipped steps.
    #[serde(default)]
    pub duration_ms: f64,
}

impl ActivityResult {
    /// Creates a successful result with a metric summary.
    #[must_use]
    pub fn success(summary: HashMap<String, serde_json::Value>) -> Self {
        Self {
            status: ActivityStatus::Success,
            summary,
            artifacts: Vec::new(),
            error: None,
            duration_ms: 0.0,
        }
    }

    /// Creates a successful result with no summary.
    #[must_use]
    pub fn success_empty() -> Self {
        Self::success(HashMap::new())
    }

    /// Creates a successful result with a single metric.
    #[must_use]
    pub fn success_metric(key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut summary = HashMap::new();
        summary.insert(key.into(), value);
        Self::success(summary)
    }

    /// Creates a failure result with error detail.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: ActivityStatus::Failure,
            summary: HashMap::new(),
            artifacts: Vec::new(),
            error: Some(error.into()),
            duration_ms: 0.0,
        }
    }

    /// Creates a skipped result. Skipped steps carry no summary.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            status: ActivityStatus::Skipped,
            summary: HashMap::new(),
            artifacts: Vec::new(),
            error: None,
            duration_ms: 0.0,
        }
    }

    /// Attaches artifact references.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Vec<String>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Attaches a single artifact reference.
    #[must_use]
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifacts.push(artifact.into());
        self
    }

    /// Sets the measured duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Returns true if the result is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

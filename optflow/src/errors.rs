//! Error types for the optflow engine.
//!
//! The taxonomy separates configuration/wiring errors, which abort
//! initialization, from per-call usage errors, which are returned to the
//! immediate caller and never abort an in-flight pipeline. Activity
//! execution failures are not represented here at all: the pipeline runner
//! contains them inside an [`crate::activity::ActivityResult`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The kind of named entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundKind {
    /// A context name absent from the catalog.
    Context,
    /// An activity name unbound in the registry.
    Activity,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Activity => write!(f, "activity"),
        }
    }
}

/// The main error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or missing context/activity configuration. Fatal to
    /// initialization; not recoverable without fixing the configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
    },

    /// A named context or activity is absent. Recoverable by retrying with
    /// a valid name.
    #[error("Unknown {kind}: '{name}'")]
    NotFound {
        /// Whether a context or an activity was looked up.
        kind: NotFoundKind,
        /// The name that failed to resolve.
        name: String,
    },

    /// The activity exists but is not permitted under the current context.
    #[error("Activity '{activity}' is not enabled under context '{context}'")]
    NotEnabled {
        /// The rejected activity name.
        activity: String,
        /// The context whose allowlist rejected it.
        context: String,
    },

    /// An operation was attempted before `initialize`.
    #[error("No active context: call initialize() first")]
    NotInitialized,

    /// An activity name was registered twice. Startup wiring bug.
    #[error("Activity '{name}' is already registered")]
    DuplicateActivity {
        /// The doubly-bound name.
        name: String,
    },

    /// Repository acquisition failed before any pipeline step ran.
    #[error("Repository acquisition failed for '{repo}': {message}")]
    Acquisition {
        /// The repository identifier that failed to acquire.
        repo: String,
        /// What went wrong.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a context-not-found error.
    #[must_use]
    pub fn context_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Context,
            name: name.into(),
        }
    }

    /// Creates an activity-not-found error.
    #[must_use]
    pub fn activity_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Activity,
            name: name.into(),
        }
    }

    /// Creates a not-enabled error.
    #[must_use]
    pub fn not_enabled(activity: impl Into<String>, context: impl Into<String>) -> Self {
        Self::NotEnabled {
            activity: activity.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate-activity error.
    #[must_use]
    pub fn duplicate_activity(name: impl Into<String>) -> Self {
        Self::DuplicateActivity { name: name.into() }
    }

    /// Creates an acquisition error.
    #[must_use]
    pub fn acquisition(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Acquisition {
            repo: source.into(),
            message: message.into(),
        }
    }

    /// Returns the stable, machine-readable kind of this error.
    ///
    /// Callers surface this alongside the human-readable message so that a
    /// front-end can branch on the kind without parsing text.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::NotFound { .. } => "not_found",
            Self::NotEnabled { .. } => "not_enabled",
            Self::NotInitialized => "not_initialized",
            Self::DuplicateActivity { .. } => "duplicate_activity",
            Self::Acquisition { .. } => "acquisition",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Returns true if the error is fatal to initialization rather than a
    /// per-call usage error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::DuplicateActivity { .. }
        )
    }

    /// Converts to a dictionary representation for surface hand-off.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));

        match self {
            Self::NotFound { kind, name } => {
                map.insert("entity".to_string(), serde_json::json!(kind.to_string()));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::NotEnabled { activity, context } => {
                map.insert("activity".to_string(), serde_json::json!(activity));
                map.insert("context".to_string(), serde_json::json!(context));
            }
            Self::DuplicateActivity { name } => {
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::Acquisition { repo, .. } => {
                map.insert("source".to_string(), serde_json::json!(repo));
            }
            _ => {}
        }

        map
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(EngineError::config("x").kind(), "config");
        assert_eq!(EngineError::context_not_found("x").kind(), "not_found");
        assert_eq!(EngineError::not_enabled("a", "c").kind(), "not_enabled");
        assert_eq!(EngineError::NotInitialized.kind(), "not_initialized");
        assert_eq!(
            EngineError::duplicate_activity("a").kind(),
            "duplicate_activity"
        );
        assert_eq!(EngineError::acquisition("r", "m").kind(), "acquisition");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::config("bad catalog").is_fatal());
        assert!(EngineError::duplicate_activity("scan").is_fatal());
        assert!(!EngineError::context_not_found("missing").is_fatal());
        assert!(!EngineError::NotInitialized.is_fatal());
        assert!(!EngineError::not_enabled("scan", "review").is_fatal());
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let err = EngineError::context_not_found("general-analyst");
        assert_eq!(err.to_string(), "Unknown context: 'general-analyst'");

        let err = EngineError::activity_not_found("optimize");
        assert_eq!(err.to_string(), "Unknown activity: 'optimize'");
    }

    #[test]
    fn test_to_dict_carries_kind_and_detail() {
        let err = EngineError::not_enabled("optimize", "general-analyst");
        let dict = err.to_dict();

        assert_eq!(dict.get("kind").unwrap(), "not_enabled");
        assert_eq!(dict.get("activity").unwrap(), "optimize");
        assert_eq!(dict.get("context").unwrap(), "general-analyst");
        assert!(dict.get("message").is_some());
    }
}

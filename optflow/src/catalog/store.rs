//! Loading and validation of context catalogs.

use super::Context;
use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// On-disk shape of a context catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextCatalog {
    /// Name of the context `initialize()` selects when none is requested.
    /// Falls back to the first declared context when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_context: Option<String>,

    /// Declared contexts, in catalog order.
    pub contexts: Vec<Context>,
}

/// Validated, read-only store of context definitions.
///
/// The store is all-or-nothing: if any single context in the catalog is
/// invalid, the whole load fails and no partial catalog is exposed.
/// Reloading requires a fresh load cycle; there is no in-place update.
#[derive(Debug, Clone)]
pub struct ContextStore {
    contexts: Vec<Arc<Context>>,
    default_context: String,
}

impl ContextStore {
    /// Loads and validates a catalog from a JSON file.
    ///
    /// `known_activities` is the set of names bound in the activity
    /// registry; every context's allowlist must be a non-empty subset of it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the file is missing, the JSON is
    /// malformed, or any context violates the catalog invariants.
    pub fn load_from_path(
        path: impl AsRef<Path>,
        known_activities: &HashSet<String>,
    ) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!(
                "cannot read context catalog '{}': {e}",
                path.display()
            ))
        })?;
        Self::load_from_str(&raw, known_activities)
    }

    /// Loads and validates a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] on malformed JSON or invariant
    /// violations.
    pub fn load_from_str(raw: &str, known_activities: &HashSet<String>) -> EngineResult<Self> {
        let catalog: ContextCatalog = serde_json::from_str(raw)
            .map_err(|e| EngineError::config(format!("malformed context catalog: {e}")))?;
        Self::from_catalog(catalog, known_activities)
    }

    /// Validates an already-deserialized catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the catalog is empty, declares a
    /// duplicate context name, declares an empty activity allowlist, lists
    /// an activity unknown to the registry, or names a default context that
    /// is not declared.
    pub fn from_catalog(
        catalog: ContextCatalog,
        known_activities: &HashSet<String>,
    ) -> EngineResult<Self> {
        if catalog.contexts.is_empty() {
            return Err(EngineError::config("context catalog declares no contexts"));
        }

        let mut seen = HashSet::new();
        for context in &catalog.contexts {
            if context.name.trim().is_empty() {
                return Err(EngineError::config("context with empty name"));
            }
            if !seen.insert(context.name.clone()) {
                return Err(EngineError::config(format!(
                    "duplicate context name '{}'",
                    context.name
                )));
            }
            if context.enabled_activities.is_empty() {
                return Err(EngineError::config(format!(
                    "context '{}' enables no activities",
                    context.name
                )));
            }
            for activity in &context.enabled_activities {
                if !known_activities.contains(activity) {
                    return Err(EngineError::config(format!(
                        "context '{}' enables unregistered activity '{activity}'",
                        context.name
                    )));
                }
            }
        }

        let default_context = match catalog.default_context {
            Some(name) => {
                if !seen.contains(&name) {
                    return Err(EngineError::config(format!(
                        "default context '{name}' is not declared in the catalog"
                    )));
                }
                name
            }
            // First declared context stands in when no default is named.
            None => catalog.contexts[0].name.clone(),
        };

        Ok(Self {
            contexts: catalog.contexts.into_iter().map(Arc::new).collect(),
            default_context,
        })
    }

    /// Returns the context with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the name is unknown.
    pub fn get(&self, name: &str) -> EngineResult<Arc<Context>> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| EngineError::context_not_found(name))
    }

    /// Returns all contexts in catalog order.
    #[must_use]
    pub fn contexts(&self) -> Vec<Arc<Context>> {
        self.contexts.clone()
    }

    /// Returns the name of the default context.
    #[must_use]
    pub fn default_context(&self) -> &str {
        &self.default_context
    }

    /// Returns the number of loaded contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns true if the store holds no contexts.
    ///
    /// Always false for a successfully loaded store; present for API
    /// completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn known(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    const CATALOG: &str = r#"{
        "default_context": "general-analyst",
        "contexts": [
            {
                "name": "general-analyst",
                "description": "Broad first-pass review",
                "focus_areas": ["structure", "quality"],
                "enabled_activities": ["analyze", "document"],
                "prompt_bundle": "general",
                "output_template": "standard-report",
                "analysis_depth": "standard"
            },
            {
                "name": "performance",
                "enabled_activities": ["analyze"],
                "analysis_depth": "deep"
            }
        ]
    }"#;

    #[test]
    fn test_load_valid_catalog() {
        let store = ContextStore::load_from_str(CATALOG, &known(&["analyze", "document"])).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.default_context(), "general-analyst");

        let ctx = store.get("general-analyst").unwrap();
        assert_eq!(ctx.enabled_activities, vec!["analyze", "document"]);
    }

    #[test]
    fn test_default_falls_back_to_first_context() {
        let raw = r#"{"contexts": [
            {"name": "a", "enabled_activities": ["analyze"]},
            {"name": "b", "enabled_activities": ["analyze"]}
        ]}"#;
        let store = ContextStore::load_from_str(raw, &known(&["analyze"])).unwrap();
        assert_eq!(store.default_context(), "a");
    }

    #[test]
    fn test_get_unknown_context() {
        let store = ContextStore::load_from_str(CATALOG, &known(&["analyze", "document"])).unwrap();
        let err = store.get("missing").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_rejects_unregistered_activity() {
        // "document" not registered: the whole load must fail, not just the
        // offending context.
        let err = ContextStore::load_from_str(CATALOG, &known(&["analyze"])).unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("document"));
    }

    #[test]
    fn test_rejects_empty_allowlist() {
        let raw = r#"{"contexts": [{"name": "hollow", "enabled_activities": []}]}"#;
        let err = ContextStore::load_from_str(raw, &known(&["analyze"])).unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("hollow"));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let raw = r#"{"contexts": []}"#;
        let err = ContextStore::load_from_str(raw, &known(&[])).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_rejects_duplicate_context_names() {
        let raw = r#"{"contexts": [
            {"name": "dup", "enabled_activities": ["analyze"]},
            {"name": "dup", "enabled_activities": ["analyze"]}
        ]}"#;
        let err = ContextStore::load_from_str(raw, &known(&["analyze"])).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_undeclared_default() {
        let raw = r#"{"default_context": "ghost", "contexts": [
            {"name": "real", "enabled_activities": ["analyze"]}
        ]}"#;
        let err = ContextStore::load_from_str(raw, &known(&["analyze"])).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ContextStore::load_from_str("{not json", &known(&[])).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err =
            ContextStore::load_from_path("/nonexistent/catalog.json", &known(&[])).unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}

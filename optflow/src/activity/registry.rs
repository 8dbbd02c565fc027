//! Activity registry binding names to capability handles.

use super::Activity;
use crate::errors::{EngineError, EngineResult};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Maps activity names to capability handles supplied by external
/// collaborators at process start.
///
/// Populated once during startup wiring and read-only afterwards. The
/// registry has no knowledge of contexts; the enabled-activity policy lives
/// entirely in [`crate::catalog::Context`].
#[derive(Default)]
pub struct ActivityRegistry {
    handles: RwLock<HashMap<String, Arc<dyn Activity>>>,
}

impl ActivityRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an activity handle under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateActivity`] if the name is already
    /// bound. Rebinding is a startup wiring bug, not a supported operation.
    pub fn register(&self, handle: Arc<dyn Activity>) -> EngineResult<()> {
        let name = handle.name().to_string();
        let mut handles = self.handles.write();
        if handles.contains_key(&name) {
            return Err(EngineError::duplicate_activity(name));
        }
        handles.insert(name, handle);
        Ok(())
    }

    /// Resolves a name to its bound handle.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Activity>> {
        self.handles.read().get(name).cloned()
    }

    /// Returns true if the name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handles.read().contains_key(name)
    }

    /// Returns all bound names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handles.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the bound names as a set, for catalog validation.
    #[must_use]
    pub fn name_set(&self) -> HashSet<String> {
        self.handles.read().keys().cloned().collect()
    }

    /// Returns the number of bound handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    /// Returns true if no handles are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }
}

impl std::fmt::Debug for ActivityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityRegistry")
            .field("activities", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::NoOpActivity;

    #[test]
    fn test_register_and_resolve() {
        let registry = ActivityRegistry::new();
        registry
            .register(Arc::new(NoOpActivity::new("analyze")))
            .unwrap();

        assert!(registry.contains("analyze"));
        assert!(registry.resolve("analyze").is_some());
        assert!(registry.resolve("unknown").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = ActivityRegistry::new();
        registry
            .register(Arc::new(NoOpActivity::new("analyze")))
            .unwrap();

        let err = registry
            .register(Arc::new(NoOpActivity::new("analyze")))
            .unwrap_err();
        assert_eq!(err.kind(), "duplicate_activity");

        // The original binding survives.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = ActivityRegistry::new();
        registry
            .register(Arc::new(NoOpActivity::new("document")))
            .unwrap();
        registry
            .register(Arc::new(NoOpActivity::new("analyze")))
            .unwrap();

        assert_eq!(registry.names(), vec!["analyze", "document"]);
    }
}

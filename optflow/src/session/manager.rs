//! The context manager: sole owner of the active session.

use crate::catalog::{Context, ContextStore};
use crate::errors::{EngineError, EngineResult};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Owns the process-wide active session and mediates every read or change
/// of which context is active.
///
/// The session is the engine's only mutable shared state: `None` before the
/// first [`initialize`](Self::initialize), then `Some` until process exit.
/// There is no destroy operation so the state stays inspectable after a
/// pipeline completes.
///
/// [`current`](Self::current) hands out an `Arc<Context>` clone. A caller
/// that captures the clone at the start of a run keeps operating under that
/// context even if a concurrent switch replaces the active one — the
/// capture-at-start discipline the pipeline runner relies on.
pub struct ContextManager {
    store: ContextStore,
    active: RwLock<Option<Arc<Context>>>,
}

impl ContextManager {
    /// Creates a manager over a loaded store. No context is active yet.
    #[must_use]
    pub fn new(store: ContextStore) -> Self {
        Self {
            store,
            active: RwLock::new(None),
        }
    }

    /// Activates the named context, or the catalog's default when `name` is
    /// `None`.
    ///
    /// Initializing twice is permitted and simply replaces the active
    /// context; auto-init flows rely on this being idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the requested or default name
    /// cannot be resolved in the store.
    pub fn initialize(&self, name: Option<&str>) -> EngineResult<Arc<Context>> {
        let name = name.unwrap_or_else(|| self.store.default_context());
        let context = self.store.get(name).map_err(|_| {
            EngineError::config(format!("cannot initialize: context '{name}' is not loaded"))
        })?;

        *self.active.write() = Some(context.clone());
        info!(context = %context.name, "session initialized");
        Ok(context)
    }

    /// Switches to the named context.
    ///
    /// Switching away from the context of an in-flight pipeline does not
    /// cancel that pipeline; it completes under the context captured when it
    /// started.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the name is unknown; the
    /// active context is left unchanged.
    pub fn switch_context(&self, name: &str) -> EngineResult<Arc<Context>> {
        let context = self.store.get(name)?;
        let previous = self
            .active
            .write()
            .replace(context.clone())
            .map(|c| c.name.clone());
        info!(context = %context.name, ?previous, "context switched");
        Ok(context)
    }

    /// Returns the active context.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first
    /// [`initialize`](Self::initialize).
    pub fn current(&self) -> EngineResult<Arc<Context>> {
        self.active
            .read()
            .clone()
            .ok_or(EngineError::NotInitialized)
    }

    /// Returns true once a context is active.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.active.read().is_some()
    }

    /// Lists every loaded context, in catalog order.
    ///
    /// Available regardless of initialization state since it only reads the
    /// store.
    #[must_use]
    pub fn list_available(&self) -> Vec<Arc<Context>> {
        self.store.contexts()
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &ContextStore {
        &self.store
    }
}

impl std::fmt::Debug for ContextManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextManager")
            .field("contexts", &self.store.len())
            .field(
                "active",
                &self.active.read().as_ref().map(|c| c.name.clone()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn store() -> ContextStore {
        let raw = r#"{
            "default_context": "general-analyst",
            "contexts": [
                {"name": "general-analyst", "enabled_activities": ["analyze", "document"]},
                {"name": "performance", "enabled_activities": ["analyze"]}
            ]
        }"#;
        let known: HashSet<String> = ["analyze", "document"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        ContextStore::load_from_str(raw, &known).unwrap()
    }

    #[test]
    fn test_current_before_initialize() {
        let manager = ContextManager::new(store());
        let err = manager.current().unwrap_err();
        assert_eq!(err.kind(), "not_initialized");
    }

    #[test]
    fn test_initialize_default() {
        let manager = ContextManager::new(store());
        manager.initialize(None).unwrap();
        assert_eq!(manager.current().unwrap().name, "general-analyst");
    }

    #[test]
    fn test_initialize_named() {
        let manager = ContextManager::new(store());
        manager.initialize(Some("performance")).unwrap();
        assert_eq!(manager.current().unwrap().name, "performance");
    }

    #[test]
    fn test_initialize_twice_replaces() {
        let manager = ContextManager::new(store());
        manager.initialize(Some("performance")).unwrap();
        manager.initialize(None).unwrap();
        assert_eq!(manager.current().unwrap().name, "general-analyst");
    }

    #[test]
    fn test_initialize_unknown_is_config_error() {
        let manager = ContextManager::new(store());
        let err = manager.initialize(Some("ghost")).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_switch_context() {
        let manager = ContextManager::new(store());
        manager.initialize(None).unwrap();
        manager.switch_context("performance").unwrap();
        assert_eq!(manager.current().unwrap().name, "performance");
    }

    #[test]
    fn test_switch_to_missing_leaves_current_unchanged() {
        let manager = ContextManager::new(store());
        manager.initialize(None).unwrap();

        let err = manager.switch_context("missing").unwrap_err();
        assert_eq!(err.kind(), "not_found");
        assert_eq!(manager.current().unwrap().name, "general-analyst");
    }

    #[test]
    fn test_list_available_without_initialize() {
        let manager = ContextManager::new(store());
        let names: Vec<String> = manager
            .list_available()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["general-analyst", "performance"]);
    }

    #[test]
    fn test_captured_context_survives_switch() {
        let manager = ContextManager::new(store());
        manager.initialize(None).unwrap();

        let captured = manager.current().unwrap();
        manager.switch_context("performance").unwrap();

        // The clone captured before the switch still names the old context.
        assert_eq!(captured.name, "general-analyst");
        assert_eq!(manager.current().unwrap().name, "performance");
    }
}

//! Shared wiring fixtures.

use super::MockActivity;
use crate::activity::{ActivityRegistry, ActivityResult};
use crate::catalog::ContextStore;
use crate::orchestrator::Orchestrator;
use std::sync::Arc;

/// A small catalog with an analysis context and a narrower follow-up
/// context.
#[must_use]
pub fn sample_catalog_json() -> &'static str {
    r#"{
        "default_context": "general-analyst",
        "contexts": [
            {
                "name": "general-analyst",
                "description": "Broad first-pass review of a codebase",
                "focus_areas": ["structure", "quality"],
                "enabled_activities": ["analyze", "document"],
                "prompt_bundle": "general",
                "output_template": "standard-report",
                "analysis_depth": "standard"
            },
            {
                "name": "doc-only",
                "description": "Documentation pass without analysis",
                "enabled_activities": ["document"],
                "prompt_bundle": "docs",
                "output_template": "doc-report",
                "analysis_depth": "shallow"
            }
        ]
    }"#
}

/// Wires an orchestrator over [`sample_catalog_json`] with mock `analyze`
/// and `document` activities, returning the mocks for call inspection.
///
/// `analyze` succeeds with `{filesSeen: 3}`; `document` succeeds with
/// `{pagesWritten: 1}`. The orchestrator is not initialized.
#[must_use]
pub fn wired_orchestrator() -> (Orchestrator, Arc<MockActivity>, Arc<MockActivity>) {
    let analyze = Arc::new(MockActivity::returning(
        "analyze",
        ActivityResult::success_metric("filesSeen", serde_json::json!(3)),
    ));
    let document = Arc::new(MockActivity::returning(
        "document",
        ActivityResult::success_metric("pagesWritten", serde_json::json!(1)),
    ));

    let registry = Arc::new(ActivityRegistry::new());
    registry
        .register(analyze.clone())
        .and_then(|()| registry.register(document.clone()))
        .unwrap_or_else(|e| panic!("fixture wiring failed: {e}"));

    let store = ContextStore::load_from_str(sample_catalog_json(), &registry.name_set())
        .unwrap_or_else(|e| panic!("fixture catalog invalid: {e}"));

    (
        Orchestrator::new(store, registry),
        analyze,
        document,
    )
}

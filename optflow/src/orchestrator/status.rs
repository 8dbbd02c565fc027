//! Status snapshot for command-line and IPC callers.

use serde::{Deserialize, Serialize};

/// A point-in-time view of the engine's wiring and session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    /// True once a context has been activated.
    pub initialized: bool,

    /// Name of the active context, if any.
    pub active_context: Option<String>,

    /// Names of every loaded context, in catalog order.
    pub available_contexts: Vec<String>,

    /// Names of every registered activity, sorted.
    pub registered_activities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes() {
        let status = EngineStatus {
            initialized: true,
            active_context: Some("general-analyst".to_string()),
            available_contexts: vec!["general-analyst".to_string()],
            registered_activities: vec!["analyze".to_string()],
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["initialized"], true);
        assert_eq!(json["active_context"], "general-analyst");
    }
}

//! The renderer boundary.

use super::ReportPayload;
use async_trait::async_trait;
use std::path::PathBuf;

/// Consumes a report payload and an output-template identifier.
///
/// Rendering itself (HTML, Markdown, anything else) is outside the engine;
/// implementations live with the callers that own the output formats.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Renders the payload with the named template, returning the location
    /// of the rendered report.
    async fn render(&self, payload: &ReportPayload, template: &str) -> anyhow::Result<PathBuf>;
}

/// A renderer that discards the payload. Useful in tests and for callers
/// that only want the structured payload.
#[derive(Debug, Clone, Default)]
pub struct NullRenderer;

#[async_trait]
impl ReportRenderer for NullRenderer {
    async fn render(&self, _payload: &ReportPayload, _template: &str) -> anyhow::Result<PathBuf> {
        Ok(PathBuf::new())
    }
}

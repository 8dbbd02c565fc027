//! JSON report writing.

use async_trait::async_trait;
use optflow::report::{ReportPayload, ReportRenderer};
use std::path::PathBuf;

/// Writes report payloads as pretty-printed JSON files.
///
/// The template identifier only names the output file; this writer has no
/// templating of its own.
#[derive(Debug, Clone)]
pub struct JsonReportRenderer {
    output_dir: PathBuf,
}

impl JsonReportRenderer {
    /// Creates a renderer writing into the given directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ReportRenderer for JsonReportRenderer {
    async fn render(&self, payload: &ReportPayload, template: &str) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let file_name = if template.is_empty() {
            format!("report-{}.json", payload.run_id)
        } else {
            format!("report-{template}-{}.json", payload.run_id)
        };
        let path = self.output_dir.join(file_name);

        tokio::fs::write(&path, serde_json::to_vec_pretty(payload)?).await?;
        Ok(path)
    }
}

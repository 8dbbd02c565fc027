//! Built-in collaborator activities.
//!
//! These are deliberately thin: the engine treats analysis as an opaque
//! capability, and these handles exist so the CLI works out of the box.
//! Richer analyzers register through the same [`Activity`] trait.

use async_trait::async_trait;
use optflow::activity::{Activity, ActivityOptions, ActivityResult, OptionSpec};
use optflow::catalog::AnalysisDepth;
use optflow::target::Target;
use std::collections::HashMap;
use walkdir::WalkDir;

/// Inventory of a target tree: file and directory counts, total size and
/// per-extension histogram.
#[derive(Debug, Default)]
struct Inventory {
    files: u64,
    dirs: u64,
    bytes: u64,
    extensions: HashMap<String, u64>,
}

fn take_inventory(target: &Target, depth: AnalysisDepth) -> anyhow::Result<Inventory> {
    let root = target.location();
    if !root.exists() {
        anyhow::bail!("target path does not exist: {}", root.display());
    }

    let mut walker = WalkDir::new(root);
    if depth == AnalysisDepth::Shallow {
        walker = walker.max_depth(1);
    }

    let mut inventory = Inventory::default();
    // depth 0 is the root itself; never filter it even when the caller
    // passed a dot path.
    for entry in walker.into_iter().filter_entry(|e| {
        e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
    }) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            inventory.dirs += 1;
        } else if entry.file_type().is_file() {
            inventory.files += 1;
            if let Ok(meta) = entry.metadata() {
                inventory.bytes += meta.len();
            }
            if let Some(ext) = entry.path().extension() {
                *inventory
                    .extensions
                    .entry(ext.to_string_lossy().to_string())
                    .or_insert(0) += 1;
            }
        }
    }
    Ok(inventory)
}

/// Walks the target and reports a file census.
#[derive(Debug, Clone, Default)]
pub struct ScanActivity;

impl ScanActivity {
    /// Creates the scan activity.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Activity for ScanActivity {
    fn name(&self) -> &str {
        "scan"
    }

    async fn execute(
        &self,
        target: &Target,
        options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        let depth = options.depth.unwrap_or_default();
        let inventory = take_inventory(target, depth)?;

        let mut summary = HashMap::new();
        summary.insert("filesSeen".to_string(), serde_json::json!(inventory.files));
        summary.insert("dirsSeen".to_string(), serde_json::json!(inventory.dirs));
        summary.insert("totalBytes".to_string(), serde_json::json!(inventory.bytes));
        summary.insert(
            "extensions".to_string(),
            serde_json::json!(inventory.extensions),
        );

        Ok(ActivityResult::success(summary))
    }
}

/// Writes an inventory manifest of the target as a JSON artifact.
///
/// Walks the target itself rather than reusing scan output: activities may
/// not assume any other activity ran first.
#[derive(Debug, Clone, Default)]
pub struct DocumentActivity;

impl DocumentActivity {
    /// Creates the document activity.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Activity for DocumentActivity {
    fn name(&self) -> &str {
        "document"
    }

    fn declared_options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::new("output", "directory the manifest artifact is written into"),
            OptionSpec::new("depth", "how deep the inventory walk goes")
                .with_default("the context's depth"),
        ]
    }

    async fn execute(
        &self,
        target: &Target,
        options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        let depth = options.depth.unwrap_or_default();
        let inventory = take_inventory(target, depth)?;

        let manifest = serde_json::json!({
            "target": target.describe(),
            "files": inventory.files,
            "directories": inventory.dirs,
            "total_bytes": inventory.bytes,
            "extensions": inventory.extensions,
        });

        let mut result =
            ActivityResult::success_metric("pagesWritten", serde_json::json!(1));

        if let Some(output) = &options.output {
            tokio::fs::create_dir_all(output).await?;
            let path = output.join("manifest.json");
            tokio::fs::write(&path, serde_json::to_vec_pretty(&manifest)?).await?;
            result = result.with_artifact(path.display().to_string());
        }

        Ok(result)
    }
}

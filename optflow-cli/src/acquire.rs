//! Shell-out repository acquisition.

use async_trait::async_trait;
use optflow::acquire::{RepoSource, RepositoryAcquirer};
use optflow::errors::{EngineError, EngineResult};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

/// Acquires repositories by shelling out to `git clone`.
#[derive(Debug, Clone, Default)]
pub struct GitCloneAcquirer;

impl GitCloneAcquirer {
    /// Creates the acquirer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RepositoryAcquirer for GitCloneAcquirer {
    async fn acquire(&self, source: &RepoSource, dest: &Path) -> EngineResult<PathBuf> {
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| EngineError::acquisition(source.url.clone(), format!("cannot create destination: {e}")))?;

        let checkout = dest.join(&source.dir_name);
        if checkout.exists() {
            return Err(EngineError::acquisition(
                source.url.clone(),
                format!("destination '{}' already exists", checkout.display()),
            ));
        }

        info!(url = %source.url, dest = %checkout.display(), "cloning repository");

        let output = Command::new("git")
            .arg("clone")
            .arg(&source.url)
            .arg(&source.dir_name)
            .current_dir(dest)
            .output()
            .await
            .map_err(|e| {
                EngineError::acquisition(source.url.clone(), format!("cannot run git: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::acquisition(
                source.url.clone(),
                format!("git clone failed: {}", stderr.trim()),
            ));
        }

        Ok(checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_checkout_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let source = RepoSource::parse("acme/widgets").unwrap();
        std::fs::create_dir(tmp.path().join("widgets")).unwrap();

        let err = GitCloneAcquirer::new()
            .acquire(&source, tmp.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "acquisition");
        assert!(err.to_string().contains("already exists"));
    }
}

//! Repository acquisition boundary.
//!
//! The engine consumes a normalized repository identifier and a destination
//! path, and receives back a local path to substitute as the pipeline
//! target. The acquisition mechanics (cloning, network, credentials) live
//! behind [`RepositoryAcquirer`], outside the engine.

use crate::errors::{EngineError, EngineResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A normalized repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSource {
    /// The URL handed to the acquisition collaborator.
    pub url: String,
    /// Directory name the checkout lands in.
    pub dir_name: String,
}

impl RepoSource {
    /// Parses a repository identifier.
    ///
    /// Accepts a full URL (`https://…/name.git`, `git@…:owner/name.git`) or
    /// the `owner/name` shorthand, which normalizes to a GitHub HTTPS URL.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Acquisition`] when the identifier is empty or
    /// no directory name can be derived from it.
    pub fn parse(raw: &str) -> EngineResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EngineError::acquisition(raw, "empty repository identifier"));
        }

        let url = if trimmed.contains("://") || trimmed.starts_with("git@") {
            trimmed.to_string()
        } else if trimmed.split('/').filter(|s| !s.is_empty()).count() == 2
            && !trimmed.starts_with('/')
            && !trimmed.ends_with('/')
        {
            // owner/name shorthand
            format!("https://github.com/{trimmed}.git")
        } else {
            return Err(EngineError::acquisition(
                raw,
                "expected a URL or an owner/name shorthand",
            ));
        };

        let dir_name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(|s| s.trim_end_matches(".git"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                EngineError::acquisition(raw, "cannot derive a checkout directory name")
            })?
            .to_string();

        Ok(Self { url, dir_name })
    }
}

impl std::fmt::Display for RepoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Acquires a repository into a local destination.
///
/// Failures must short-circuit before any pipeline step runs; the
/// orchestrator never starts a pipeline against a target that failed to
/// materialize.
#[async_trait]
pub trait RepositoryAcquirer: Send + Sync {
    /// Materializes the source under `dest`, returning the checkout path.
    async fn acquire(&self, source: &RepoSource, dest: &Path) -> EngineResult<PathBuf>;
}

/// Resolves the effective root of a checkout.
///
/// Some acquisition flows leave the real content one level down (a clone
/// into a wrapper directory). When the checkout contains exactly one
/// non-hidden subdirectory and no files, that subdirectory is the root.
#[must_use]
pub fn resolve_checkout_root(checkout: &Path) -> PathBuf {
    let Ok(entries) = std::fs::read_dir(checkout) else {
        return checkout.to_path_buf();
    };

    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => dirs.push(entry.path()),
            Ok(_) => return checkout.to_path_buf(),
            Err(_) => return checkout.to_path_buf(),
        }
    }

    match dirs.as_slice() {
        [single] => single.clone(),
        _ => checkout.to_path_buf(),
    }
}

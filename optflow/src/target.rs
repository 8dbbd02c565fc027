//! The subject an activity runs against.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The subject being processed by an activity: a local path supplied by the
/// caller, or a checkout produced by repository acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    /// A local filesystem path.
    Path {
        /// The path itself.
        path: PathBuf,
    },
    /// A local checkout of an acquired repository.
    Checkout {
        /// Local path of the checkout.
        path: PathBuf,
        /// The repository identifier it was acquired from.
        source: String,
    },
}

impl Target {
    /// Wraps a local path.
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path { path: path.into() }
    }

    /// Wraps an acquired checkout with its originating identifier.
    #[must_use]
    pub fn checkout(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self::Checkout {
            path: path.into(),
            source: source.into(),
        }
    }

    /// The on-disk location activities operate on.
    #[must_use]
    pub fn location(&self) -> &Path {
        match self {
            Self::Path { path } | Self::Checkout { path, .. } => path,
        }
    }

    /// Human-readable description used in reports and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Path { path } => path.display().to_string(),
            Self::Checkout { path, source } => {
                format!("{source} (checkout at {})", path.display())
            }
        }
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Self::Path { path }
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Self::Path {
            path: path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_target() {
        let target = Target::path("/tmp/project");
        assert_eq!(target.location(), Path::new("/tmp/project"));
        assert_eq!(target.describe(), "/tmp/project");
    }

    #[test]
    fn test_checkout_target_describes_source() {
        let target = Target::checkout("/tmp/work/repo", "acme/repo");
        assert_eq!(target.location(), Path::new("/tmp/work/repo"));
        assert!(target.describe().starts_with("acme/repo"));
    }
}

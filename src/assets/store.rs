//! Filesystem mirror for downloaded font assets.
//!
//! # Responsibilities
//! - Map a canonical URL path to a location under the asset root
//! - Existence checks (an existing file is never refetched)
//! - Parent directory creation before a first write
//!
//! # Design Decisions
//! - Paths mirror the URL path structure one-to-one
//! - First write wins for the lifetime of the root; no freshness checks
//! - Concurrent writers for the same path race to identical content

use std::path::{Component, Path, PathBuf};

use crate::error::ProxyError;

/// Handle to the on-disk asset mirror.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Base directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a canonical URL path (query already stripped) to its mirrored
    /// location under the root.
    ///
    /// Returns an error for empty paths and for paths with `.` or `..`
    /// components, which would resolve outside the mirror.
    pub fn local_path(&self, url_path: &str) -> Result<PathBuf, ProxyError> {
        let relative = url_path.trim_start_matches('/');
        if relative.is_empty() {
            return Err(ProxyError::AssetPath(url_path.to_string()));
        }

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ProxyError::AssetPath(url_path.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Whether a mirrored file already exists at the given location.
    pub async fn contains(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Create any missing parent directories for a first write.
    pub async fn prepare(&self, path: &Path) -> Result<(), ProxyError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ProxyError::AssetIo {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}

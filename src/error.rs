//! Error definitions for request handling and asset localization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while proxying a page or mirroring an asset.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream request failed (network error, timeout, or non-success status).
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// An asset URL path would resolve outside the asset root.
    #[error("asset path {0:?} escapes the asset root")]
    AssetPath(String),

    /// Filesystem operation on the asset store failed.
    #[error("asset store I/O error at {path:?}: {source}")]
    AssetIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

//! Error types for post compilation and manifest building.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from compiling a single document into a post.
#[derive(Debug, Error)]
pub enum PostError {
    /// Document has no usable title.
    #[error("Missing title in {id}")]
    MissingTitle {
        /// Id the document would have compiled to.
        id: String,
    },
}

/// Errors from building or serializing the post manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Listing the content directory failed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Reading one document failed.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Manifest serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Record types for the file store.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::formats::{detect_media_kind, MediaKind};

/// Lifecycle of a web conversion job.
///
/// A fresh upload starts at `Uploaded` and each conversion request
/// moves it through `Converting` to `Done` or `Failed`. The same
/// upload may be converted again, re-entering `Converting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Uploaded,
    Converting,
    Done,
    Failed,
}

/// An uploaded file tracked by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Generated identifier linking upload, conversion and download.
    pub file_id: String,
    /// Sanitized original filename.
    pub original_name: String,
    /// Name of the file as stored under the uploads directory.
    pub stored_name: String,
    /// Size of the stored file in bytes.
    pub size_bytes: u64,
    /// Extension-based classification.
    pub kind: MediaKind,
    /// Current position in the job lifecycle.
    pub state: JobState,
}

/// Basic file metadata for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub size: u64,
    pub size_mb: f64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl FileInfo {
    /// Builds a file info record from a size and path-based detection.
    pub fn new(size: u64, path: &Path) -> Self {
        let size_mb = (size as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
        Self {
            size,
            size_mb,
            kind: detect_media_kind(path),
        }
    }
}

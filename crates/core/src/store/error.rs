//! Error types for the file store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while managing uploaded and converted files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Upload arrived without a filename.
    #[error("No file selected")]
    EmptyFilename,

    /// Upload extension is not in the allow-list.
    #[error("File type not allowed: {filename}")]
    DisallowedExtension { filename: String },

    /// No upload is tracked under the given identifier.
    #[error("File not found: {file_id}")]
    UnknownFileId { file_id: String },

    /// A requested download does not exist.
    #[error("Download not found: {path}")]
    DownloadNotFound { path: PathBuf },

    /// Failed to create a storage directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading or writing stored files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! File system backed store for uploads and converted outputs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::StoreError;
use super::types::{FileInfo, JobState, UploadedFile};
use crate::formats::{detect_media_kind, is_allowed_upload, TargetFormat};

/// Store for transient uploaded and converted files, rooted at a
/// configurable path with `uploads/` and `downloads/` subdirectories.
///
/// Uploads are keyed by generated UUIDs; an in-memory map from
/// identifier to record replaces any directory scanning. Distinct UUIDs
/// make concurrent uploads collision-free. Cleanup racing an in-flight
/// conversion reading from the uploads directory is an accepted hazard.
pub struct FileStore {
    uploads_dir: PathBuf,
    downloads_dir: PathBuf,
    records: RwLock<HashMap<String, UploadedFile>>,
}

impl FileStore {
    /// Creates a store rooted at the given path, creating the uploads
    /// and downloads directories if missing.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let uploads_dir = root.join("uploads");
        let downloads_dir = root.join("downloads");

        for dir in [&uploads_dir, &downloads_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::DirectoryCreationFailed {
                    path: dir.clone(),
                    source: e,
                })?;
        }

        Ok(Self {
            uploads_dir,
            downloads_dir,
            records: RwLock::new(HashMap::new()),
        })
    }

    /// The uploads directory.
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// The downloads directory.
    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Strips path separators and control characters from a client
    /// supplied filename, keeping only a safe basename.
    fn sanitize_filename(name: &str) -> String {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        base.chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
            .collect::<String>()
            .trim()
            .replace(' ', "_")
    }

    /// Validates and persists an uploaded file, returning its record.
    ///
    /// Rejections (empty filename, disallowed extension) happen before
    /// anything is written to disk.
    pub async fn save_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<UploadedFile, StoreError> {
        if original_name.is_empty() {
            return Err(StoreError::EmptyFilename);
        }

        if !is_allowed_upload(original_name) {
            return Err(StoreError::DisallowedExtension {
                filename: original_name.to_string(),
            });
        }

        let sanitized = Self::sanitize_filename(original_name);
        let extension = Path::new(&sanitized)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let file_id = Uuid::new_v4().to_string();
        let stored_name = format!("{}.{}", file_id, extension);
        let path = self.uploads_dir.join(&stored_name);

        fs::write(&path, bytes).await?;
        debug!("Stored upload {} as {:?}", file_id, path);

        let record = UploadedFile {
            file_id: file_id.clone(),
            original_name: sanitized,
            stored_name,
            size_bytes: bytes.len() as u64,
            kind: detect_media_kind(&path),
            state: JobState::Uploaded,
        };

        self.records
            .write()
            .await
            .insert(file_id, record.clone());

        Ok(record)
    }

    /// Looks up an upload record by identifier.
    pub async fn get_upload(&self, file_id: &str) -> Result<UploadedFile, StoreError> {
        self.records
            .read()
            .await
            .get(file_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownFileId {
                file_id: file_id.to_string(),
            })
    }

    /// Absolute path of a stored upload.
    pub async fn upload_path(&self, file_id: &str) -> Result<PathBuf, StoreError> {
        let record = self.get_upload(file_id).await?;
        Ok(self.uploads_dir.join(record.stored_name))
    }

    /// Advances the job state for an upload. Unknown identifiers are
    /// ignored (the conversion outcome is reported separately).
    pub async fn set_state(&self, file_id: &str, state: JobState) {
        if let Some(record) = self.records.write().await.get_mut(file_id) {
            record.state = state;
        }
    }

    /// Name a converted output file gets under the downloads directory.
    pub fn output_filename(file_id: &str, target: TargetFormat) -> String {
        format!("{}_converted.{}", file_id, target.extension())
    }

    /// Path a conversion output should be written to.
    pub fn output_path(&self, file_id: &str, target: TargetFormat) -> PathBuf {
        self.downloads_dir
            .join(Self::output_filename(file_id, target))
    }

    /// Resolves a download by filename, erroring when it does not exist.
    pub async fn download_path(&self, filename: &str) -> Result<PathBuf, StoreError> {
        // Reject anything that could escape the downloads directory
        let safe = Self::sanitize_filename(filename);
        let path = self.downloads_dir.join(&safe);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(StoreError::DownloadNotFound { path }),
        }
    }

    /// Display name a download is served under: `converted.{ext}` when
    /// the stored name carries the converted suffix, the stored name
    /// otherwise.
    pub fn display_name(filename: &str) -> String {
        match filename.split_once("_converted.") {
            Some((_, ext)) => format!("converted.{}", ext),
            None => filename.to_string(),
        }
    }

    /// Basic metadata for a stored file.
    pub async fn file_info(&self, path: &Path) -> Result<FileInfo, StoreError> {
        let meta = fs::metadata(path).await?;
        Ok(FileInfo::new(meta.len(), path))
    }

    /// Deletes every file in the uploads directory and forgets all
    /// records. Returns the number of files removed. Conversions still
    /// reading an upload may fail afterwards; that race is accepted.
    pub async fn cleanup_uploads(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        let mut entries = fs::read_dir(&self.uploads_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() {
                match fs::remove_file(&path).await {
                    Ok(()) => removed += 1,
                    Err(e) => warn!("Failed to remove {:?}: {}", path, e),
                }
            }
        }
        self.records.write().await.clear();
        Ok(removed)
    }
}

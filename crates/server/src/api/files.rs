//! Upload, download and cleanup handlers.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, Request, Response, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{info, warn};

use mediaconv_core::{metrics, FileInfo, FileStore, StoreError};

use super::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_id: String,
    pub original_name: String,
    pub filename: String,
    pub file_info: FileInfo,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
}

fn store_error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::EmptyFilename | StoreError::DisallowedExtension { .. } => {
            StatusCode::BAD_REQUEST
        }
        StoreError::UnknownFileId { .. } | StoreError::DownloadNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Accepts a multipart upload under the `file` field, validates its
/// extension and stores it under a generated identifier.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            match field.bytes().await {
                Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                Err(e) => {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse::new(format!("Failed to read file: {}", e))),
                    ))
                }
            }
        }
    }

    let (Some(bytes), Some(name)) = (file_bytes, filename) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No file selected")),
        ));
    };

    match state.store().save_upload(&name, &bytes).await {
        Ok(record) => {
            metrics::UPLOADS_TOTAL.inc();
            metrics::UPLOAD_BYTES_TOTAL.inc_by(record.size_bytes);
            info!(
                "Uploaded {} as {} ({} bytes)",
                record.original_name, record.file_id, record.size_bytes
            );

            let path = state.store().uploads_dir().join(&record.stored_name);
            let file_info = state.store().file_info(&path).await.map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string())),
                )
            })?;

            Ok(Json(UploadResponse {
                success: true,
                file_id: record.file_id,
                original_name: record.original_name,
                filename: record.stored_name,
                file_info,
            }))
        }
        Err(e) => {
            warn!("Upload rejected: {}", e);
            Err((store_error_status(&e), Json(ErrorResponse::new(e.to_string()))))
        }
    }
}

/// Streams a converted file back as an attachment under a display name
/// derived from the identifier.
///
/// The file is never buffered in memory; `ServeFile` streams it in
/// chunks and sets content-length itself.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, (StatusCode, Json<ErrorResponse>)> {
    let path = state.store().download_path(&filename).await.map_err(|e| {
        (store_error_status(&e), Json(ErrorResponse::new(e.to_string())))
    })?;

    let display_name = FileStore::display_name(&filename);
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        display_name
    ))
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    let request = Request::get("/").body(Body::empty()).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;
    let mut response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(infallible) => match infallible {},
    };
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);

    Ok(response)
}

/// Deletes all files currently in the upload directory.
pub async fn cleanup(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CleanupResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store().cleanup_uploads().await {
        Ok(removed) => {
            info!("Cleanup removed {} uploaded files", removed);
            Ok(Json(CleanupResponse {
                success: true,
                message: format!("Removed {} temporary files", removed),
            }))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Cleanup failed: {}", e))),
        )),
    }
}

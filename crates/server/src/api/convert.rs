//! Conversion handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use mediaconv_core::{
    metrics, ConversionRequest, ConverterError, FileInfo, FileStore, JobState, StoreError,
    TargetFormat,
};

use super::ErrorResponse;
use crate::state::AppState;

const DEFAULT_QUALITY: &str = "192k";

#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    pub file_id: Option<String>,
    pub format: Option<String>,
    pub quality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub output_file: String,
    pub output_info: FileInfo,
    pub download_url: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Converts a previously uploaded file to the requested format.
///
/// The identifier is trusted as-is: there is no ownership or session
/// check, so any client holding a file_id can convert and download that
/// upload. Known gap, accepted because the service has no auth surface.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConvertBody>,
) -> Result<Json<ConvertResponse>, HandlerError> {
    let (Some(file_id), Some(format)) = (body.file_id, body.format) else {
        return Err(bad_request("Missing parameters"));
    };

    let target: TargetFormat = format
        .parse()
        .map_err(|e: mediaconv_core::FormatParseError| bad_request(e.to_string()))?;

    let quality = body.quality.unwrap_or_else(|| DEFAULT_QUALITY.to_string());

    let input_path = state.store().upload_path(&file_id).await.map_err(|e| {
        let status = match e {
            StoreError::UnknownFileId { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse::new(e.to_string())))
    })?;

    let output_path = state.store().output_path(&file_id, target);
    let request = ConversionRequest::new(&input_path, &output_path, target, &quality)
        .map_err(|e| bad_request(e.to_string()))?;

    state.store().set_state(&file_id, JobState::Converting).await;
    info!("Converting {} to {}", file_id, target);

    let start = Instant::now();
    let result = state.converter().convert(request).await;
    metrics::CONVERSION_DURATION
        .with_label_values(&[&target.kind().to_string()])
        .observe(start.elapsed().as_secs_f64());

    match result {
        Ok(result) => {
            metrics::CONVERSIONS_TOTAL.with_label_values(&["ok"]).inc();
            state.store().set_state(&file_id, JobState::Done).await;

            let output_file = FileStore::output_filename(&file_id, target);
            let output_info = state
                .store()
                .file_info(&result.output_path)
                .await
                .map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse::new(e.to_string())),
                    )
                })?;

            Ok(Json(ConvertResponse {
                success: true,
                download_url: format!("/download/{}", output_file),
                output_file,
                output_info,
            }))
        }
        Err(e) => {
            metrics::CONVERSIONS_TOTAL
                .with_label_values(&["failed"])
                .inc();
            state.store().set_state(&file_id, JobState::Failed).await;
            error!("Conversion of {} failed: {}", file_id, e);

            let status = match e {
                ConverterError::InvalidQuality { .. } => StatusCode::BAD_REQUEST,
                ConverterError::InputNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ErrorResponse::new(e.to_string()))))
        }
    }
}

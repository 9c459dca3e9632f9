//! Status and health handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct SupportedFormats {
    pub audio: Vec<&'static str>,
    pub video: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub ffmpeg_available: bool,
    pub supported_formats: SupportedFormats,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Capability report: whether the external tool is reachable and which
/// target formats are supported. Also serves as the `/` status page
/// (HTML templating is out of scope).
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ffmpeg_available: state.converter().is_available().await,
        supported_formats: SupportedFormats {
            audio: state.converter().supported_audio_formats(),
            video: state.converter().supported_video_formats(),
        },
    })
}

pub async fn prometheus_metrics() -> String {
    metrics::render()
}

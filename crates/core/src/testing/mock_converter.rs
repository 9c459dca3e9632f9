//! Mock converter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ConversionRequest, ConversionResult, Converter, ConverterError};

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion requests for assertions
/// - Simulate success/failure
/// - Toggle tool availability
///
/// On success the mock writes a small placeholder file to the requested
/// output path, so callers that stat or stream the output keep working.
#[derive(Debug)]
pub struct MockConverter {
    requests: Arc<RwLock<Vec<ConversionRequest>>>,
    next_error: Arc<RwLock<Option<String>>>,
    available: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            available: Arc::new(RwLock::new(true)),
        }
    }

    /// Get all recorded conversion requests.
    pub async fn recorded_requests(&self) -> Vec<ConversionRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of conversions performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Make the next conversion fail with the given reason.
    pub async fn fail_next(&self, reason: impl Into<String>) {
        *self.next_error.write().await = Some(reason.into());
    }

    /// Control what `validate` reports.
    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError> {
        self.requests.write().await.push(request.clone());

        if let Some(reason) = self.next_error.write().await.take() {
            return Err(ConverterError::conversion_failed(reason, None));
        }

        let contents = b"mock output";
        if let Some(parent) = request.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.output_path, contents).await?;

        Ok(ConversionResult {
            output_path: request.output_path,
            output_size_bytes: contents.len() as u64,
            duration_ms: 1,
            output_format: request.target.extension().to_string(),
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if *self.available.read().await {
            Ok(())
        } else {
            Err(ConverterError::FfmpegNotFound {
                path: std::path::PathBuf::from("ffmpeg"),
            })
        }
    }
}

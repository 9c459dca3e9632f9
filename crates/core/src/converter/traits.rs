//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionRequest, ConversionResult};
use crate::formats::{audio_extensions, video_extensions};

/// A converter that can transcode media files.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts a media file according to the request.
    ///
    /// The operation is atomic from the caller's point of view: either
    /// the output file exists on success, or an error is returned. No
    /// retries, no partial-failure semantics.
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError>;

    /// Validates that the external tool is reachable.
    async fn validate(&self) -> Result<(), ConverterError>;

    /// Whether the external tool is reachable.
    async fn is_available(&self) -> bool {
        self.validate().await.is_ok()
    }

    /// Returns the supported audio target extensions.
    fn supported_audio_formats(&self) -> Vec<&'static str> {
        audio_extensions()
    }

    /// Returns the supported video target extensions.
    fn supported_video_formats(&self) -> Vec<&'static str> {
        video_extensions()
    }
}

//! Request and result types for the converter module.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::ConverterError;
use crate::formats::TargetFormat;

static BITRATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(\d+)k(?:bps)?$").unwrap());
static RESOLUTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(\d+)p$").unwrap());

/// Quality setting parsed from the user-supplied string.
///
/// Audio targets take a bitrate like `192k`, video targets a resolution
/// label like `720p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    /// Audio bitrate in kbps.
    Bitrate(u32),
    /// Maximum output height in pixels.
    Resolution(u32),
}

impl Quality {
    /// Parses a quality string for the given target.
    pub fn parse(raw: &str, target: TargetFormat) -> Result<Self, ConverterError> {
        let raw = raw.trim();
        if target.is_video() {
            if let Some(caps) = RESOLUTION_RE.captures(raw) {
                if let Ok(height) = caps[1].parse::<u32>() {
                    return Ok(Quality::Resolution(height));
                }
            }
        } else if let Some(caps) = BITRATE_RE.captures(raw) {
            if let Ok(kbps) = caps[1].parse::<u32>() {
                return Ok(Quality::Bitrate(kbps));
            }
        }

        Err(ConverterError::InvalidQuality {
            quality: raw.to_string(),
            format: target,
        })
    }
}

/// A single conversion invocation. Constructed fresh per call, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Path of the file to convert.
    pub input_path: PathBuf,
    /// Path the converted file should be written to.
    pub output_path: PathBuf,
    /// Target container/codec format.
    pub target: TargetFormat,
    /// Quality setting for the target kind.
    pub quality: Quality,
}

impl ConversionRequest {
    /// Builds a request, parsing the quality string against the target.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        target: TargetFormat,
        quality: &str,
    ) -> Result<Self, ConverterError> {
        Ok(Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            target,
            quality: Quality::parse(quality, target)?,
        })
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Path of the produced file.
    pub output_path: PathBuf,
    /// Size of the produced file in bytes.
    pub output_size_bytes: u64,
    /// Wall-clock conversion time in milliseconds.
    pub duration_ms: u64,
    /// Extension of the produced format.
    pub output_format: String,
}

impl ConversionResult {
    /// Output size in megabytes, rounded to two decimals.
    pub fn output_size_mb(&self) -> f64 {
        let mb = self.output_size_bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    }
}

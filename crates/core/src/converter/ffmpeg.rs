//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionRequest, ConversionResult, Quality};

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds the ffmpeg argument vector for a request.
    fn build_args(&self, request: &ConversionRequest) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            request.input_path.to_string_lossy().to_string(),
        ];

        if let Some(video_codec) = request.target.ffmpeg_video_codec() {
            args.extend(["-c:v".to_string(), video_codec.to_string()]);

            if let Quality::Resolution(height) = request.quality {
                // Scale to the requested height, width follows aspect ratio
                args.extend(["-vf".to_string(), format!("scale=-2:{}", height)]);
            }

            args.extend([
                "-c:a".to_string(),
                request.target.ffmpeg_audio_codec().to_string(),
            ]);
        } else {
            // Audio target: drop any video stream, encode audio only
            args.extend([
                "-vn".to_string(),
                "-c:a".to_string(),
                request.target.ffmpeg_audio_codec().to_string(),
            ]);

            if !request.target.is_lossless_audio() {
                if let Quality::Bitrate(kbps) = request.quality {
                    args.extend(["-b:a".to_string(), format!("{}k", kbps)]);
                }
            }
        }

        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ]);

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        args.push(request.output_path.to_string_lossy().to_string());

        args
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        // Missing input fails before the subprocess is spawned
        if !request.input_path.exists() {
            return Err(ConverterError::InputNotFound {
                path: request.input_path.clone(),
            });
        }

        if let Some(parent) = request.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|_| {
                    ConverterError::OutputDirectoryFailed {
                        path: parent.to_path_buf(),
                    }
                })?;
            }
        }

        let args = self.build_args(&request);
        debug!("Running ffmpeg with args: {:?}", args);

        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(result) => result.map_err(ConverterError::Io)?,
            Err(_) => {
                // kill_on_drop reaps the child when the timed-out future drops
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        // Verify output exists and get size
        let output_meta = tokio::fs::metadata(&request.output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        let result = ConversionResult {
            output_path: request.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_format: request.target.extension().to_string(),
        };

        info!(
            "Converted {:?} to {:?} ({} bytes in {} ms)",
            request.input_path, request.output_path, result.output_size_bytes, result.duration_ms
        );

        Ok(result)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ConverterError::conversion_failed(
                format!("ffmpeg -version exited with code: {:?}", status.code()),
                None,
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConverterError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(ConverterError::Io(e)),
        }
    }
}

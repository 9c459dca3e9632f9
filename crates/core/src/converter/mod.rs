//! Converter module: the subprocess invoker around ffmpeg.
//!
//! This module provides the `Converter` trait and the `FfmpegConverter`
//! implementation. All actual decoding and encoding happens inside the
//! external tool; this code only builds the argument vector, runs the
//! process, and interprets its exit status.

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{ConversionRequest, ConversionResult, Quality};

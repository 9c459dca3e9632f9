//! Target format and media kind types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broad classification of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A conversion target, one per registry extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    // Audio
    Mp3,
    Wav,
    Flac,
    Aac,
    M4a,
    Ogg,
    // Video
    Mp4,
    Mov,
    Mkv,
    Webm,
    M4v,
}

/// Error for an extension outside the registry.
#[derive(Debug, Error)]
#[error("Unsupported format: {0}")]
pub struct FormatParseError(pub String);

impl TargetFormat {
    /// The file extension for this target (lowercase, without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Mp3 => "mp3",
            TargetFormat::Wav => "wav",
            TargetFormat::Flac => "flac",
            TargetFormat::Aac => "aac",
            TargetFormat::M4a => "m4a",
            TargetFormat::Ogg => "ogg",
            TargetFormat::Mp4 => "mp4",
            TargetFormat::Mov => "mov",
            TargetFormat::Mkv => "mkv",
            TargetFormat::Webm => "webm",
            TargetFormat::M4v => "m4v",
        }
    }

    /// Whether this target produces a video container.
    pub fn is_video(&self) -> bool {
        matches!(
            self,
            TargetFormat::Mp4
                | TargetFormat::Mov
                | TargetFormat::Mkv
                | TargetFormat::Webm
                | TargetFormat::M4v
        )
    }

    /// The media kind this target belongs to.
    pub fn kind(&self) -> MediaKind {
        if self.is_video() {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }

    /// The ffmpeg audio codec for this target.
    ///
    /// For video targets this is the codec of the embedded audio stream.
    pub fn ffmpeg_audio_codec(&self) -> &'static str {
        match self {
            TargetFormat::Mp3 => "libmp3lame",
            TargetFormat::Wav => "pcm_s16le",
            TargetFormat::Flac => "flac",
            TargetFormat::Aac | TargetFormat::M4a => "aac",
            TargetFormat::Ogg => "libvorbis",
            TargetFormat::Webm => "libopus",
            TargetFormat::Mp4 | TargetFormat::Mov | TargetFormat::Mkv | TargetFormat::M4v => "aac",
        }
    }

    /// The ffmpeg video codec for this target. None for audio targets.
    pub fn ffmpeg_video_codec(&self) -> Option<&'static str> {
        match self {
            TargetFormat::Webm => Some("libvpx-vp9"),
            TargetFormat::Mp4 | TargetFormat::Mov | TargetFormat::Mkv | TargetFormat::M4v => {
                Some("libx264")
            }
            _ => None,
        }
    }

    /// Whether the audio codec is lossless (no bitrate argument applies).
    pub fn is_lossless_audio(&self) -> bool {
        matches!(self, TargetFormat::Wav | TargetFormat::Flac)
    }
}

impl FromStr for TargetFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(TargetFormat::Mp3),
            "wav" => Ok(TargetFormat::Wav),
            "flac" => Ok(TargetFormat::Flac),
            "aac" => Ok(TargetFormat::Aac),
            "m4a" => Ok(TargetFormat::M4a),
            "ogg" => Ok(TargetFormat::Ogg),
            "mp4" => Ok(TargetFormat::Mp4),
            "mov" => Ok(TargetFormat::Mov),
            "mkv" => Ok(TargetFormat::Mkv),
            "webm" => Ok(TargetFormat::Webm),
            "m4v" => Ok(TargetFormat::M4v),
            other => Err(FormatParseError(other.to_string())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

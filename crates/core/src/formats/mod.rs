//! Format registry and media-type detection.
//!
//! The registry is two fixed extension lists (audio and video targets),
//! immutable for the process lifetime. Detection is purely an extension
//! lookup; there is no probing and no I/O here.

mod types;

pub use types::{FormatParseError, MediaKind, TargetFormat};

use std::path::Path;

/// Audio formats offered as conversion targets.
pub const AUDIO_FORMATS: [TargetFormat; 6] = [
    TargetFormat::Mp3,
    TargetFormat::Wav,
    TargetFormat::Flac,
    TargetFormat::Aac,
    TargetFormat::M4a,
    TargetFormat::Ogg,
];

/// Video formats offered as conversion targets.
pub const VIDEO_FORMATS: [TargetFormat; 5] = [
    TargetFormat::Mp4,
    TargetFormat::Mov,
    TargetFormat::Mkv,
    TargetFormat::Webm,
    TargetFormat::M4v,
];

/// Video extensions recognized by the detector but not offered as targets.
const EXTRA_VIDEO_EXTENSIONS: [&str; 9] = [
    "3gp", "asf", "divx", "f4v", "m2v", "mpg", "mpeg", "ogv", "rmvb",
];

/// Audio extensions accepted on upload but not offered as targets.
const EXTRA_AUDIO_UPLOAD_EXTENSIONS: [&str; 4] = ["mp2", "au", "aiff", "ra"];

/// Video extensions accepted on upload but not offered as targets.
const EXTRA_VIDEO_UPLOAD_EXTENSIONS: [&str; 5] = ["3gp", "mpg", "mpeg", "ogv", "divx"];

/// Target extensions for audio, in registry order.
pub fn audio_extensions() -> Vec<&'static str> {
    AUDIO_FORMATS.iter().map(|f| f.extension()).collect()
}

/// Target extensions for video, in registry order.
pub fn video_extensions() -> Vec<&'static str> {
    VIDEO_FORMATS.iter().map(|f| f.extension()).collect()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Classifies a path by extension.
///
/// Any extension outside the video superset (targets plus a handful of
/// legacy container extensions) is treated as audio, including
/// unrecognized ones.
pub fn detect_media_kind(path: &Path) -> MediaKind {
    let Some(ext) = extension_of(path) else {
        return MediaKind::Audio;
    };

    let is_video = VIDEO_FORMATS.iter().any(|f| f.extension() == ext)
        || EXTRA_VIDEO_EXTENSIONS.contains(&ext.as_str());

    if is_video {
        MediaKind::Video
    } else {
        MediaKind::Audio
    }
}

/// Whether a filename may be uploaded through the web front-end.
///
/// A filename with no extension is rejected outright.
pub fn is_allowed_upload(filename: &str) -> bool {
    let Some(ext) = extension_of(Path::new(filename)) else {
        return false;
    };
    let ext = ext.as_str();

    audio_extensions().contains(&ext)
        || video_extensions().contains(&ext)
        || EXTRA_AUDIO_UPLOAD_EXTENSIONS.contains(&ext)
        || EXTRA_VIDEO_UPLOAD_EXTENSIONS.contains(&ext)
}

pub mod config;
pub mod converter;
pub mod formats;
pub mod metrics;
pub mod store;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
    StorageConfig,
};
pub use converter::{
    ConversionRequest, ConversionResult, Converter, ConverterConfig, ConverterError,
    FfmpegConverter, Quality,
};
pub use formats::{
    audio_extensions, detect_media_kind, is_allowed_upload, video_extensions, FormatParseError,
    MediaKind, TargetFormat, AUDIO_FORMATS, VIDEO_FORMATS,
};
pub use store::{FileInfo, FileStore, JobState, StoreError, UploadedFile};

//! Command-line front-end for the media converter.
//!
//! # Examples
//!
//! ```bash
//! # Audio
//! mediaconv -i audio.wav -o audio.mp3
//! mediaconv -i song.flac -f mp3 -q 320k
//!
//! # Video
//! mediaconv -i movie.mkv -o movie.mp4 -q 720p
//!
//! # Capabilities
//! mediaconv --list-formats
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mediaconv_core::{
    audio_extensions, detect_media_kind, video_extensions, ConversionRequest, Converter,
    ConverterConfig, FfmpegConverter, TargetFormat,
};

/// Convert audio and video files between formats using ffmpeg
#[derive(Parser)]
#[command(name = "mediaconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input audio or video file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (defaults to the input path with the new extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target format
    #[arg(short, long, default_value = "mp3")]
    format: TargetFormat,

    /// Quality: bitrate for audio (192k) or resolution for video (720p)
    #[arg(short, long, default_value = "192k")]
    quality: String,

    /// Print supported formats and exit
    #[arg(long)]
    list_formats: bool,

    /// Path to the ffmpeg binary
    #[arg(long, env = "MEDIACONV_FFMPEG", default_value = "ffmpeg")]
    ffmpeg_path: PathBuf,
}

/// Lines printed by `--list-formats`: both registry sections,
/// entries uppercased and indented.
fn format_listing() -> Vec<String> {
    let mut lines = vec!["Supported audio formats:".to_string()];
    lines.extend(audio_extensions().iter().map(|e| format!("  {}", e.to_uppercase())));
    lines.push(String::new());
    lines.push("Supported video formats:".to_string());
    lines.extend(video_extensions().iter().map(|e| format!("  {}", e.to_uppercase())));
    lines
}

fn print_formats() {
    for line in format_listing() {
        println!("{}", line);
    }
}

/// Output path when none is given: input path with its extension
/// replaced by the target's.
fn default_output_path(input: &PathBuf, format: TargetFormat) -> PathBuf {
    input.with_extension(format.extension())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    if cli.list_formats {
        print_formats();
        return Ok(());
    }

    let Some(input) = cli.input else {
        bail!("An input file is required (-i/--input)");
    };

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&input, cli.format));

    let converter = FfmpegConverter::new(ConverterConfig::with_path(cli.ffmpeg_path));

    // Verify the external tool is reachable before doing any work
    converter
        .validate()
        .await
        .context("ffmpeg is not available in the environment")?;

    println!("Detected: {}", detect_media_kind(&input));
    println!("Converting to: {}", cli.format.kind());
    println!("Converting {:?} to {:?}...", input, output);

    let request = ConversionRequest::new(&input, &output, cli.format, &cli.quality)?;
    let result = converter.convert(request).await?;

    println!("Conversion completed successfully");
    println!("File saved to: {:?}", result.output_path);
    println!("File size: {:.2} MB", result.output_size_mb());

    Ok(())
}

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the dataset builder
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] FfmpegError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("No audio stream found in {0}")]
    NoAudioStream(PathBuf),

    #[error("Subtitle file contains no cues: {0}")]
    EmptySubtitles(PathBuf),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task failed: {0}")]
    Task(String),
}

/// FFmpeg-specific errors
#[derive(Error, Debug)]
pub enum FfmpegError {
    #[error("FFmpeg initialization failed: {0}")]
    InitFailed(String),

    #[error("Failed to open input file: {0}")]
    OpenInput(String),

    #[error("Failed to create output file: {0}")]
    OpenOutput(String),

    #[error("Failed to find decoder: {0}")]
    DecoderNotFound(String),

    #[error("Failed to find encoder: {0}")]
    EncoderNotFound(String),

    #[error("Failed to open encoder: {0}")]
    EncoderCreate(String),

    #[error("Failed to create resampler: {0}")]
    ResamplerCreate(String),

    #[error("Failed to write header: {0}")]
    WriteHeader(String),

    #[error("Failed to write packet: {0}")]
    WritePacket(String),

    #[error("Failed to write trailer: {0}")]
    WriteTrailer(String),

    #[error("Failed to decode packet: {0}")]
    DecodePacket(String),

    #[error("Failed to encode frame: {0}")]
    EncodeFrame(String),

    #[error("Failed to read frame: {0}")]
    ReadFrame(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DatasetError>;

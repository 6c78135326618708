//! FFmpeg module - provides wrappers and utilities for FFmpeg library access
//!
//! This module handles:
//! - FFmpeg initialization
//! - Global log level
//! - Safe accessors for fields `ffmpeg-next` does not expose

pub mod helpers;

pub use ffmpeg_next as ffmpeg;

/// Initialize FFmpeg library
///
/// Safe to call more than once; only the first call does any work.
pub fn init() -> Result<(), crate::error::FfmpegError> {
    static INIT: std::sync::OnceLock<Result<(), String>> = std::sync::OnceLock::new();

    INIT.get_or_init(|| {
        ffmpeg::init().map_err(|e| format!("ffmpeg::init() failed: {}", e))?;
        tracing::debug!("FFmpeg initialized");
        Ok(())
    })
    .clone()
    .map_err(crate::error::FfmpegError::InitFailed)
}

/// Lower FFmpeg's own log output to warnings.
///
/// The demuxers print per-stream details at INFO level, which would
/// otherwise interleave with our own log lines on stderr.
pub fn quiet_logs() {
    // SAFETY: modifies global FFmpeg state; called once at startup from the
    // main thread before any decoding starts.
    unsafe {
        ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_WARNING as i32);
    }
}

/// Get FFmpeg version information
pub fn version_info() -> String {
    // SAFETY: `avformat_version` only reads a compile-time constant.
    let v = unsafe { ffmpeg_next::ffi::avformat_version() };
    format!("libavformat {}.{}.{}", v >> 16, (v >> 8) & 0xff, v & 0xff)
}

//! Audio resampler
//!
//! Converts decoded PCM frames to packed signed 16-bit samples at the
//! requested sample rate and channel layout.

use crate::error::{DatasetError, FfmpegError, Result};
use crate::ffmpeg::helpers::{frame_layout, layout_for_channels};
use ffmpeg_next as ffmpeg;
use ffmpeg_next::software::resampling;
use ffmpeg_next::util::channel_layout::ChannelLayout;
use ffmpeg_next::util::format::sample::{Sample, Type};

/// Sample format of every `PcmBuffer`
pub const PCM_SAMPLE_FORMAT: Sample = Sample::I16(Type::Packed);

/// Audio resampler wrapping FFmpeg's `SwrContext`
pub struct AudioResampler {
    context: resampling::Context,
    output_rate: u32,
    output_channels: u16,
}

impl AudioResampler {
    /// Create a resampler from the format described by `src_frame` to
    /// packed s16 at `target_rate` with `target_channels` (mono or stereo).
    pub fn new(
        src_frame: &ffmpeg::util::frame::Audio,
        target_rate: u32,
        target_channels: u16,
    ) -> Result<Self> {
        let target_layout = layout_for_channels(target_channels).ok_or_else(|| {
            DatasetError::Config(format!(
                "Unsupported output channel count: {}",
                target_channels
            ))
        })?;

        let context = resampling::Context::get(
            src_frame.format(),
            frame_layout(src_frame),
            src_frame.rate(),
            PCM_SAMPLE_FORMAT,
            target_layout,
            target_rate,
        )
        .map_err(|e| {
            DatasetError::Ffmpeg(FfmpegError::ResamplerCreate(format!(
                "{}Hz/{:?} -> {}Hz: {}",
                src_frame.rate(),
                src_frame.format(),
                target_rate,
                e
            )))
        })?;

        Ok(Self {
            context,
            output_rate: target_rate,
            output_channels: target_channels,
        })
    }

    /// Convert one input frame, returning interleaved samples.
    ///
    /// May return nothing while the resampler is still filling its delay
    /// line.
    pub fn convert(&mut self, frame: &ffmpeg::util::frame::Audio) -> Result<Vec<i16>> {
        // Output frame must be empty; swr_convert_frame allocates it from
        // the SwrContext configuration.
        let mut out = ffmpeg::util::frame::Audio::empty();

        self.context.run(frame, &mut out).map_err(|e| {
            DatasetError::Ffmpeg(FfmpegError::ReadFrame(format!("Resampling error: {}", e)))
        })?;

        Ok(packed_samples(&out))
    }

    /// Drain any samples still buffered inside the resampler.
    pub fn flush(&mut self) -> Result<Vec<i16>> {
        let mut out = ffmpeg::util::frame::Audio::empty();
        if let Err(e) = self.context.flush(&mut out) {
            // Passthrough contexts have nothing buffered
            tracing::debug!("Resampler flush returned non-fatal error: {}", e);
            return Ok(vec![]);
        }
        Ok(packed_samples(&out))
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    pub fn output_channels(&self) -> u16 {
        self.output_channels
    }
}

/// Copy the interleaved samples out of a packed s16 frame.
fn packed_samples(frame: &ffmpeg::util::frame::Audio) -> Vec<i16> {
    let count = frame.samples() * frame.channels() as usize;
    if count == 0 {
        return vec![];
    }
    let bytes = frame.data(0);
    let len = (count * 2).min(bytes.len());
    bytes[..len]
        .chunks_exact(2)
        .map(|b| i16::from_ne_bytes([b[0], b[1]]))
        .collect()
}

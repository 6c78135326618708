//! Audio module
//!
//! Decoding, resampling, slicing and WAV output:
//! - `load_audio` decodes the best audio stream of any FFmpeg-readable file
//!   into a `PcmBuffer` in a single pass
//! - `PcmBuffer` slices by millisecond range
//! - `write_wav` encodes PCM s16le into a WAV container

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod resampler;

pub use buffer::PcmBuffer;
pub use encoder::write_wav;

use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::ffmpeg::helpers::layout_for_channels;
use decoder::SourceDecoder;
use resampler::AudioResampler;

/// Output format requested from `load_audio`; `None` keeps the source value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetFormat {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

impl TargetFormat {
    /// Mono at a fixed rate
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate: Some(sample_rate),
            channels: Some(1),
        }
    }
}

/// Decode the whole audio stream of `path` into memory.
pub fn load_audio<P: AsRef<Path>>(path: P, target: TargetFormat) -> Result<PcmBuffer> {
    let path = path.as_ref();
    crate::ffmpeg::init()?;

    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    if let Some(n) = target.channels {
        if layout_for_channels(n).is_none() {
            return Err(DatasetError::Config(format!(
                "Unsupported output channel count: {}",
                n
            )));
        }
    }

    let mut source = SourceDecoder::open(path)?;
    let mut resampler: Option<AudioResampler> = None;
    let mut samples: Vec<i16> = Vec::new();

    source.decode(|frame| {
        // The first decoded frame fixes the source format
        if resampler.is_none() {
            // Surround sources are folded down to stereo
            let rate = target.sample_rate.unwrap_or(frame.rate());
            let channels = target.channels.unwrap_or(frame.channels().clamp(1, 2));
            tracing::debug!(
                src_rate = frame.rate(),
                src_channels = frame.channels(),
                src_format = ?frame.format(),
                rate,
                channels,
                "creating resampler from first frame"
            );
            resampler = Some(AudioResampler::new(frame, rate, channels)?);
        }
        if let Some(rsmp) = resampler.as_mut() {
            samples.extend(rsmp.convert(frame)?);
        }
        Ok(())
    })?;

    if source.skipped_packets() > 0 {
        tracing::warn!(
            "Skipped {} corrupt packet(s) in {}",
            source.skipped_packets(),
            path.display()
        );
    }

    let Some(mut resampler) = resampler else {
        tracing::warn!("No audio frames decoded from {}", path.display());
        let rate = target.sample_rate.unwrap_or(source.sample_rate());
        let channels = target.channels.unwrap_or(source.channels().clamp(1, 2));
        return Ok(PcmBuffer::new(Vec::new(), rate, channels));
    };
    samples.extend(resampler.flush()?);

    let buffer = PcmBuffer::new(samples, resampler.output_rate(), resampler.output_channels());

    tracing::debug!(
        "Decoded {}: {}ms at {}Hz, {} channels",
        path.display(),
        buffer.duration_ms(),
        buffer.sample_rate(),
        buffer.channels()
    );

    Ok(buffer)
}

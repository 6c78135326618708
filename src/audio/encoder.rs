//! WAV writer
//!
//! Encodes packed s16 samples with FFmpeg's PCM encoder and muxes them into
//! a WAV file.

use std::path::Path;

use crate::error::{DatasetError, FfmpegError, Result};
use crate::ffmpeg::helpers::{encoder_codec_parameters, layout_for_channels};
use ffmpeg_next as ffmpeg;
use ffmpeg_next::codec;

use super::resampler::PCM_SAMPLE_FORMAT;

/// Samples per channel handed to the encoder at a time
const CHUNK_FRAMES: usize = 4096;

/// Write interleaved s16 samples to `path` as a PCM WAV file.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    channels: u16,
    samples: &[i16],
) -> Result<()> {
    let path = path.as_ref();
    crate::ffmpeg::init()?;

    let layout = layout_for_channels(channels).ok_or_else(|| {
        DatasetError::Config(format!("Unsupported channel count for WAV output: {}", channels))
    })?;

    let codec = codec::encoder::find(codec::Id::PCM_S16LE).ok_or_else(|| {
        DatasetError::Ffmpeg(FfmpegError::EncoderNotFound(
            "PCM s16le encoder not found in this FFmpeg build".into(),
        ))
    })?;

    let mut output = ffmpeg::format::output_as(&path, "wav").map_err(|e| {
        FfmpegError::OpenOutput(format!("Failed to create {}: {}", path.display(), e))
    })?;

    // Configure the encoder BEFORE opening
    let mut context = codec::Context::new_with_codec(codec);
    context.set_time_base(ffmpeg::Rational::new(1, sample_rate as i32));
    let mut audio_enc = context.encoder().audio().map_err(|e| {
        FfmpegError::EncoderCreate(format!("Cannot get audio encoder handle: {}", e))
    })?;
    audio_enc.set_rate(sample_rate as i32);
    audio_enc.set_format(PCM_SAMPLE_FORMAT);
    audio_enc.set_channel_layout(layout);
    let mut encoder = audio_enc
        .open_as(codec)
        .map_err(|e| FfmpegError::EncoderCreate(format!("Failed to open PCM encoder: {}", e)))?;

    let encoder_timebase = ffmpeg::Rational::new(1, sample_rate as i32);
    {
        let mut stream = output
            .add_stream(codec)
            .map_err(|e| FfmpegError::OpenOutput(format!("add_stream: {}", e)))?;
        stream.set_parameters(encoder_codec_parameters(&encoder));
        stream.set_time_base(encoder_timebase);
    }

    output
        .write_header()
        .map_err(|e| FfmpegError::WriteHeader(e.to_string()))?;

    // The muxer may pick its own stream timebase in write_header
    let stream_timebase = output
        .stream(0)
        .map(|s| s.time_base())
        .unwrap_or(encoder_timebase);

    let ch = channels as usize;
    let mut pts: i64 = 0;
    for chunk in samples.chunks(CHUNK_FRAMES * ch) {
        let frames = chunk.len() / ch;
        if frames == 0 {
            continue;
        }
        let mut frame = ffmpeg::util::frame::Audio::new(PCM_SAMPLE_FORMAT, frames, layout);
        frame.set_rate(sample_rate);
        frame.set_pts(Some(pts));
        {
            let data = frame.data_mut(0);
            for (dst, s) in data.chunks_exact_mut(2).zip(&chunk[..frames * ch]) {
                dst.copy_from_slice(&s.to_ne_bytes());
            }
        }
        pts += frames as i64;

        encoder
            .send_frame(&frame)
            .map_err(|e| FfmpegError::EncodeFrame(format!("send_frame: {}", e)))?;
        drain_packets(&mut encoder, &mut output, encoder_timebase, stream_timebase)?;
    }

    encoder
        .send_eof()
        .map_err(|e| FfmpegError::EncodeFrame(format!("send_eof: {}", e)))?;
    drain_packets(&mut encoder, &mut output, encoder_timebase, stream_timebase)?;

    output
        .write_trailer()
        .map_err(|e| FfmpegError::WriteTrailer(e.to_string()))?;

    tracing::trace!(
        path = %path.display(),
        frames = pts,
        "wrote wav"
    );

    Ok(())
}

fn drain_packets(
    encoder: &mut ffmpeg::encoder::Audio,
    output: &mut ffmpeg::format::context::Output,
    encoder_timebase: ffmpeg::Rational,
    stream_timebase: ffmpeg::Rational,
) -> Result<()> {
    let mut packet = ffmpeg::codec::packet::Packet::empty();
    loop {
        match encoder.receive_packet(&mut packet) {
            Ok(()) => {
                packet.set_stream(0);
                packet.rescale_ts(encoder_timebase, stream_timebase);
                packet
                    .write_interleaved(output)
                    .map_err(|e| FfmpegError::WritePacket(e.to_string()))?;
            }
            Err(ffmpeg::Error::Other { errno }) if errno == ffmpeg::error::EAGAIN => break,
            Err(ffmpeg::Error::Eof) => break,
            Err(e) => {
                return Err(DatasetError::Ffmpeg(FfmpegError::EncodeFrame(format!(
                    "receive_packet: {}",
                    e
                ))))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_encoder_available() {
        crate::ffmpeg::init().unwrap();
        assert!(codec::encoder::find(codec::Id::PCM_S16LE).is_some());
    }

    #[test]
    fn test_write_wav_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<i16> = (0..8000).map(|i| ((i % 100) * 100) as i16).collect();

        write_wav(&path, 8000, 1, &samples).unwrap();

        let len = std::fs::metadata(&path).unwrap().len();
        // 44-byte RIFF header (or slightly more) plus 16000 bytes of PCM
        assert!(len >= 16000 + 44, "unexpected size {}", len);
        let header = std::fs::read(&path).unwrap();
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
    }

    #[test]
    fn test_write_wav_rejects_surround() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_wav(dir.path().join("x.wav"), 8000, 6, &[0; 60]);
        assert!(matches!(result, Err(DatasetError::Config(_))));
    }
}

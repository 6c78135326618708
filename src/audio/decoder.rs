//! Source audio decoding
//!
//! Opens a media file, picks its best audio stream and feeds every packet
//! of that stream through the codec, handing decoded frames to a callback.
//! Corrupt packets in downloaded media are counted and skipped.

use std::path::Path;

use ffmpeg_next as ffmpeg;
use ffmpeg_next::util::frame;

use crate::error::{DatasetError, FfmpegError, Result};
use crate::ffmpeg::helpers::{codec_params_channels, codec_params_sample_rate};

/// Best audio stream of an opened media file, ready to decode
pub struct SourceDecoder {
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::decoder::Audio,
    stream_index: usize,
    skipped_packets: usize,
}

impl SourceDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let input = ffmpeg::format::input(&path)
            .map_err(|e| FfmpegError::OpenInput(format!("Failed to open {:?}: {}", path, e)))?;

        let (stream_index, decoder) = {
            let stream = input
                .streams()
                .best(ffmpeg::media::Type::Audio)
                .ok_or_else(|| DatasetError::NoAudioStream(path.to_path_buf()))?;
            let params = stream.parameters();
            tracing::debug!(
                "Found audio stream {} in {}: {}Hz, {} channels, codec={:?}",
                stream.index(),
                path.display(),
                codec_params_sample_rate(&params),
                codec_params_channels(&params),
                params.id()
            );

            let decoder = ffmpeg::codec::Context::from_parameters(params)
                .and_then(|context| context.decoder().audio())
                .map_err(|e| {
                    FfmpegError::DecoderNotFound(format!(
                        "No usable decoder for {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            (stream.index(), decoder)
        };

        Ok(Self {
            input,
            decoder,
            stream_index,
            skipped_packets: 0,
        })
    }

    /// Decode the stream to the end, flushing the codec, and pass every
    /// frame to `on_frame` in presentation order.
    pub fn decode<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&frame::Audio) -> Result<()>,
    {
        let Self {
            input,
            decoder,
            stream_index,
            skipped_packets,
        } = self;

        for (stream, packet) in input.packets() {
            if stream.index() != *stream_index {
                continue;
            }
            match decoder.send_packet(&packet) {
                Ok(()) => {}
                Err(ffmpeg::Error::InvalidData) => *skipped_packets += 1,
                Err(e) => {
                    return Err(FfmpegError::DecodePacket(format!(
                        "packet at pts {:?}: {}",
                        packet.pts(),
                        e
                    ))
                    .into())
                }
            }
            drain(decoder, &mut on_frame)?;
        }

        match decoder.send_eof() {
            Ok(()) | Err(ffmpeg::Error::Eof) => {}
            Err(ffmpeg::Error::Other { errno }) if errno == ffmpeg::error::EAGAIN => {}
            Err(e) => return Err(FfmpegError::DecodePacket(format!("flush: {}", e)).into()),
        }
        drain(decoder, &mut on_frame)
    }

    /// Packets rejected as invalid data so far
    pub fn skipped_packets(&self) -> usize {
        self.skipped_packets
    }

    pub fn sample_rate(&self) -> u32 {
        self.decoder.rate()
    }

    pub fn channels(&self) -> u16 {
        self.decoder.channels()
    }
}

/// Pull frames until the codec wants more input.
fn drain<F>(decoder: &mut ffmpeg::decoder::Audio, on_frame: &mut F) -> Result<()>
where
    F: FnMut(&frame::Audio) -> Result<()>,
{
    let mut decoded = frame::Audio::empty();
    loop {
        match decoder.receive_frame(&mut decoded) {
            Ok(()) => on_frame(&decoded)?,
            Err(ffmpeg::Error::Eof) => return Ok(()),
            Err(ffmpeg::Error::Other { errno }) if errno == ffmpeg::error::EAGAIN => return Ok(()),
            Err(e) => return Err(FfmpegError::ReadFrame(e.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::write_wav;

    #[test]
    fn test_common_youtube_decoders_present() {
        crate::ffmpeg::init().unwrap();
        for id in [
            ffmpeg::codec::Id::OPUS,
            ffmpeg::codec::Id::AAC,
            ffmpeg::codec::Id::PCM_S16LE,
        ] {
            assert!(ffmpeg::codec::decoder::find(id).is_some(), "{:?}", id);
        }
    }

    #[test]
    fn test_decode_visits_every_sample() {
        crate::ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, 2, &vec![100i16; 8000 * 2]).unwrap();

        let mut source = SourceDecoder::open(&path).unwrap();
        assert_eq!(source.sample_rate(), 8000);
        assert_eq!(source.channels(), 2);

        let mut frames = 0;
        source
            .decode(|f| {
                frames += f.samples();
                Ok(())
            })
            .unwrap();
        assert_eq!(frames, 8000);
        assert_eq!(source.skipped_packets(), 0);
    }

    #[test]
    fn test_decode_stops_on_callback_error() {
        crate::ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, 1, &vec![0i16; 8000]).unwrap();

        let mut source = SourceDecoder::open(&path).unwrap();
        let result = source.decode(|_| Err(DatasetError::Dataset("stop".into())));
        assert!(matches!(result, Err(DatasetError::Dataset(_))));
    }

    #[test]
    fn test_open_without_audio_stream() {
        crate::ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.srt");
        std::fs::write(&path, "1\n00:00:00,000 --> 00:00:01,000\nhi\n").unwrap();

        // Either the demuxer finds no audio or it refuses the file outright
        assert!(matches!(
            SourceDecoder::open(&path),
            Err(DatasetError::NoAudioStream(_)) | Err(DatasetError::Ffmpeg(_))
        ));
    }
}

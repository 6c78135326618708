//! Subtitle/audio alignment
//!
//! Merges short subtitle cues, decodes the source audio once and writes one
//! `N.wav` / `N.txt` pair per merged cue.

use std::path::{Path, PathBuf};

use crate::audio::{load_audio, write_wav, PcmBuffer, TargetFormat};
use crate::config::AlignConfig;
use crate::error::{DatasetError, Result};
use crate::subtitle::{merge_cues, read_srt, SubtitleCue, Timestamp};

/// One written audio/text pair
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSegment {
    /// 0-based position in the output directory
    pub index: usize,
    pub cue: SubtitleCue,
    pub wav_path: PathBuf,
    pub text_path: PathBuf,
}

/// Cuts an audio file into per-cue clips
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    /// Create the output directory. Fails if it already exists so that a
    /// previous run is never overwritten.
    pub fn new(config: AlignConfig) -> Result<Self> {
        let output = &config.output_path;
        if output.exists() {
            return Err(DatasetError::OutputExists(output.clone()));
        }
        std::fs::create_dir_all(output)?;
        tracing::info!("Created directory {}", output.display());

        Ok(Self { config })
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Run the alignment and return the written segments in order.
    pub fn align(&self) -> Result<Vec<AlignedSegment>> {
        let cues = read_srt(&self.config.srt_path)?;
        if cues.is_empty() {
            return Err(DatasetError::EmptySubtitles(self.config.srt_path.clone()));
        }

        let threshold = Timestamp::from_millis(self.config.threshold_ms());
        let merged = merge_cues(&cues, threshold);
        tracing::info!(
            "Merged {} cues into {} (threshold {}s)",
            cues.len(),
            merged.len(),
            self.config.threshold_secs
        );

        let target = TargetFormat {
            sample_rate: self.config.sample_rate,
            channels: self.config.channels,
        };
        let audio = load_audio(&self.config.audio_path, target)?;
        tracing::info!(
            "Loaded {} ({}ms, {}Hz, {} channels)",
            self.config.audio_path.display(),
            audio.duration_ms(),
            audio.sample_rate(),
            audio.channels()
        );

        let segments = self.write_segments(&audio, &merged)?;

        tracing::info!(
            "Wrote {} segments to {}",
            segments.len(),
            self.config.output_path.display()
        );
        Ok(segments)
    }

    fn write_segments(&self, audio: &PcmBuffer, cues: &[SubtitleCue]) -> Result<Vec<AlignedSegment>> {
        let mut segments = Vec::with_capacity(cues.len());

        for cue in cues {
            let samples = audio.slice_ms(cue.start.as_millis(), cue.end.as_millis());
            if samples.is_empty() {
                tracing::warn!(
                    "Skipping cue {} ({} --> {}): no audio in range",
                    cue.index,
                    cue.start,
                    cue.end
                );
                continue;
            }

            let index = segments.len();
            let wav_path = self.config.output_path.join(format!("{}.wav", index));
            let text_path = self.config.output_path.join(format!("{}.txt", index));

            write_wav(&wav_path, audio.sample_rate(), audio.channels(), samples)?;
            std::fs::write(&text_path, &cue.text)?;

            tracing::debug!(
                index,
                start = %cue.start,
                end = %cue.end,
                "wrote segment"
            );

            segments.push(AlignedSegment {
                index,
                cue: cue.clone(),
                wav_path,
                text_path,
            });
        }

        Ok(segments)
    }
}

//! Pipeline configuration

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Text normalization pipeline applied to transcripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CleanerKind {
    /// Full English normalization (times, numbers, abbreviations, symbols)
    #[default]
    English,
    /// Lowercase and whitespace only
    Basic,
}

/// Download stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Video URL
    pub url: Option<String>,

    /// Directory receiving the audio file and the caption tracks
    pub output_dir: PathBuf,

    /// yt-dlp executable
    pub yt_dlp_path: String,

    /// Also fetch automatically generated captions
    pub include_auto_captions: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: None,
            output_dir: PathBuf::from("data/raw"),
            yt_dlp_path: "yt-dlp".to_string(),
            include_auto_captions: false,
        }
    }
}

/// Alignment stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Source audio file
    pub audio_path: PathBuf,

    /// SubRip file with the transcript
    pub srt_path: PathBuf,

    /// Directory receiving `N.wav` / `N.txt` pairs; must not exist yet
    pub output_path: PathBuf,

    /// Minimum span in seconds before a merged cue is closed
    pub threshold_secs: f64,

    /// Output sample rate, `None` keeps the source rate
    pub sample_rate: Option<u32>,

    /// Output channel count, `None` keeps the source layout
    pub channels: Option<u16>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            audio_path: PathBuf::from("data/raw/audio.webm"),
            srt_path: PathBuf::from("data/raw/captions.srt"),
            output_path: PathBuf::from("data/aligned"),
            threshold_secs: 5.0,
            sample_rate: None,
            channels: None,
        }
    }
}

impl AlignConfig {
    /// Threshold in milliseconds
    pub fn threshold_ms(&self) -> u64 {
        (self.threshold_secs.max(0.0) * 1000.0).round() as u64
    }
}

/// Dataset preparation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Directory holding the aligned `N.wav` / `N.txt` pairs
    pub aligned_path: PathBuf,

    /// Root of the generated datasets
    pub output_path: PathBuf,

    /// Speaker name, used for directory names and the `speaker` column
    pub speaker_name: String,

    /// Sample rate of the audio arrays in the columnar dataset
    pub sample_rate: u32,

    /// Cleaner producing the `text_normalized` column
    pub cleaner: CleanerKind,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            aligned_path: PathBuf::from("data/aligned"),
            output_path: PathBuf::from("data/dataset"),
            speaker_name: "speaker".to_string(),
            sample_rate: 22050,
            cleaner: CleanerKind::English,
        }
    }
}

impl PrepareConfig {
    /// `<output>/<speaker>`
    pub fn speaker_dir(&self) -> PathBuf {
        self.output_path.join(&self.speaker_name)
    }

    /// `<output>/<speaker>/wavs`
    pub fn wav_dir(&self) -> PathBuf {
        self.speaker_dir().join("wavs")
    }

    /// `<output>/<speaker>/metadata.txt`
    pub fn metadata_path(&self) -> PathBuf {
        self.speaker_dir().join("metadata.txt")
    }

    /// `<output>/<speaker>_tts`
    pub fn dataset_dir(&self) -> PathBuf {
        self.output_path.join(format!("{}_tts", self.speaker_name))
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Download configuration
    pub download: DownloadConfig,

    /// Alignment configuration
    pub align: AlignConfig,

    /// Dataset preparation configuration
    pub prepare: PrepareConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            download: DownloadConfig::default(),
            align: AlignConfig::default(),
            prepare: PrepareConfig::default(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.align.threshold_secs, 5.0);
        assert_eq!(config.prepare.sample_rate, 22050);
        assert_eq!(config.prepare.cleaner, CleanerKind::English);
        assert_eq!(config.download.yt_dlp_path, "yt-dlp");
    }

    #[test]
    fn test_threshold_ms() {
        let align = AlignConfig {
            threshold_secs: 2.5,
            ..Default::default()
        };
        assert_eq!(align.threshold_ms(), 2500);

        let negative = AlignConfig {
            threshold_secs: -1.0,
            ..Default::default()
        };
        assert_eq!(negative.threshold_ms(), 0);
    }

    #[test]
    fn test_prepare_paths() {
        let prepare = PrepareConfig {
            output_path: PathBuf::from("/out"),
            speaker_name: "alice".to_string(),
            ..Default::default()
        };
        assert_eq!(prepare.speaker_dir(), PathBuf::from("/out/alice"));
        assert_eq!(prepare.wav_dir(), PathBuf::from("/out/alice/wavs"));
        assert_eq!(prepare.metadata_path(), PathBuf::from("/out/alice/metadata.txt"));
        assert_eq!(prepare.dataset_dir(), PathBuf::from("/out/alice_tts"));
    }
}

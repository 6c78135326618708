//! Configuration file support
//!
//! Loads pipeline configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{AlignConfig, CleanerKind, DownloadConfig, PipelineConfig, PrepareConfig};
use crate::error::{DatasetError, Result};

/// Configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Download settings
    pub download: Option<DownloadSettings>,
    /// Alignment settings
    pub align: Option<AlignSettings>,
    /// Dataset preparation settings
    pub prepare: Option<PrepareSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Video URL
    pub url: Option<String>,
    /// Output directory for audio and captions
    pub output_dir: Option<PathBuf>,
    /// yt-dlp executable
    pub yt_dlp_path: Option<String>,
    /// Also fetch automatic captions
    pub include_auto_captions: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignSettings {
    /// Source audio file
    pub audio_path: Option<PathBuf>,
    /// SubRip transcript
    pub srt_path: Option<PathBuf>,
    /// Output directory for aligned pairs
    pub output_path: Option<PathBuf>,
    /// Merge threshold in seconds
    pub threshold: Option<f64>,
    /// Output sample rate
    pub sample_rate: Option<u32>,
    /// Output channel count
    pub channels: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrepareSettings {
    /// Directory of aligned pairs
    pub aligned_path: Option<PathBuf>,
    /// Dataset output root
    pub output_path: Option<PathBuf>,
    /// Speaker name
    pub speaker_name: Option<String>,
    /// Dataset sample rate
    pub sample_rate: Option<u32>,
    /// Text cleaner (english, basic)
    pub cleaner: Option<CleanerKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            DatasetError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DatasetError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            download: Some(DownloadSettings {
                url: Some("https://www.youtube.com/watch?v=VIDEO_ID".to_string()),
                output_dir: Some(defaults.download.output_dir),
                yt_dlp_path: Some(defaults.download.yt_dlp_path),
                include_auto_captions: Some(defaults.download.include_auto_captions),
            }),
            align: Some(AlignSettings {
                audio_path: Some(defaults.align.audio_path),
                srt_path: Some(defaults.align.srt_path),
                output_path: Some(defaults.align.output_path),
                threshold: Some(defaults.align.threshold_secs),
                sample_rate: None,
                channels: None,
            }),
            prepare: Some(PrepareSettings {
                aligned_path: Some(defaults.prepare.aligned_path),
                output_path: Some(defaults.prepare.output_path),
                speaker_name: Some(defaults.prepare.speaker_name),
                sample_rate: Some(defaults.prepare.sample_rate),
                cleaner: Some(defaults.prepare.cleaner),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to PipelineConfig, filling unset fields with defaults
    pub fn into_pipeline_config(self) -> PipelineConfig {
        let download = self.download.unwrap_or_default();
        let align = self.align.unwrap_or_default();
        let prepare = self.prepare.unwrap_or_default();
        let d = PipelineConfig::default();

        PipelineConfig {
            download: DownloadConfig {
                url: download.url,
                output_dir: download.output_dir.unwrap_or(d.download.output_dir),
                yt_dlp_path: download.yt_dlp_path.unwrap_or(d.download.yt_dlp_path),
                include_auto_captions: download
                    .include_auto_captions
                    .unwrap_or(d.download.include_auto_captions),
            },
            align: AlignConfig {
                audio_path: align.audio_path.unwrap_or(d.align.audio_path),
                srt_path: align.srt_path.unwrap_or(d.align.srt_path),
                output_path: align.output_path.unwrap_or(d.align.output_path),
                threshold_secs: align.threshold.unwrap_or(d.align.threshold_secs),
                sample_rate: align.sample_rate,
                channels: align.channels,
            },
            prepare: PrepareConfig {
                aligned_path: prepare.aligned_path.unwrap_or(d.prepare.aligned_path),
                output_path: prepare.output_path.unwrap_or(d.prepare.output_path),
                speaker_name: prepare.speaker_name.unwrap_or(d.prepare.speaker_name),
                sample_rate: prepare.sample_rate.unwrap_or(d.prepare.sample_rate),
                cleaner: prepare.cleaner.unwrap_or(d.prepare.cleaner),
            },
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or(d.log_level),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or(d.log_format),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default_config();
        assert_eq!(config.align.as_ref().unwrap().threshold, Some(5.0));
        assert_eq!(config.prepare.as_ref().unwrap().sample_rate, Some(22050));
    }

    #[test]
    fn test_config_file_roundtrip() {
        let config = ConfigFile::default_config();

        let mut temp_file = NamedTempFile::new().unwrap();
        let content = toml::to_string_pretty(&config).unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let loaded = ConfigFile::from_file(temp_file.path()).unwrap();
        assert_eq!(
            loaded.prepare.unwrap().speaker_name,
            config.prepare.unwrap().speaker_name
        );
    }

    #[test]
    fn test_partial_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "[align]\nthreshold = 3.5\n\n[prepare]\nspeaker_name = \"bob\"\ncleaner = \"basic\"\n"
        )
        .unwrap();

        let config = ConfigFile::from_file(temp_file.path())
            .unwrap()
            .into_pipeline_config();
        assert_eq!(config.align.threshold_secs, 3.5);
        assert_eq!(config.prepare.speaker_name, "bob");
        assert_eq!(config.prepare.cleaner, CleanerKind::Basic);
        assert_eq!(config.prepare.sample_rate, 22050);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[align]\nthreshold = \"soon\"\n").unwrap();
        let result = ConfigFile::from_file(temp_file.path());
        assert!(matches!(result, Err(DatasetError::Config(_))));
    }

    #[test]
    fn test_generate_default_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        generate_default_config(&path).unwrap();

        assert!(path.exists());
        let loaded = ConfigFile::from_file(&path).unwrap().into_pipeline_config();
        assert_eq!(loaded.align.threshold_secs, 5.0);
        assert_eq!(loaded.log_format, "pretty");
    }
}

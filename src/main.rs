//! TTS Dataset Builder
//!
//! Builds single-speaker text-to-speech datasets from YouTube videos:
//! downloads audio and captions, cuts the audio at merged subtitle cues,
//! normalizes the transcripts and packages everything in the LJSpeech
//! layout plus a columnar JSON Lines dataset.

#![allow(dead_code)]

mod align;
mod audio;
mod cli;
mod config;
mod config_file;
mod dataset;
mod download;
mod error;
mod ffmpeg;
#[cfg(test)]
mod integration;
mod subtitle;
mod text;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::align::{AlignedSegment, Aligner};
use crate::cli::{Cli, Command};
use crate::config::{AlignConfig, PipelineConfig, PrepareConfig};
use crate::dataset::DatasetSummary;
use crate::download::YoutubeDownloader;
use crate::error::{DatasetError, Result};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "tts-dataset-builder";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig { output, force } = &cli.command {
        if output.exists() && !*force {
            return Err(DatasetError::Config(format!(
                "{} already exists, use --force to overwrite",
                output.display()
            )));
        }
        config_file::generate_default_config(output)?;
        println!("Wrote default configuration to {}", output.display());
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    cli.apply(&mut config);

    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    ffmpeg::init()?;
    ffmpeg::quiet_logs();
    tracing::debug!("FFmpeg version: {}", ffmpeg::version_info());
    tracing::debug!("Configuration: {:?}", config);

    match cli.command {
        Command::Download(_) => {
            let url = config.download.url.clone().ok_or_else(|| {
                DatasetError::Config("No video URL given on the command line or in [download]".into())
            })?;
            let downloader = YoutubeDownloader::new(&config.download);
            let assets = downloader.download(&url, &config.download.output_dir).await?;
            tracing::info!(
                "Downloaded audio {} and {} caption track(s)",
                assets.audio_path.display(),
                assets.caption_paths.len()
            );
        }
        Command::Align(_) => {
            run_align(config.align).await?;
        }
        Command::Prepare { .. } => {
            run_prepare(config.prepare).await?;
        }
        Command::Run { .. } => {
            let segments = run_align(config.align).await?;
            if segments.is_empty() {
                return Err(DatasetError::Dataset("Alignment produced no clips".into()));
            }
            run_prepare(config.prepare).await?;
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

/// Read the configuration file, or fall back to defaults when it is absent
fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    if cli.config.exists() {
        Ok(config_file::ConfigFile::from_file(&cli.config)?.into_pipeline_config())
    } else {
        Ok(PipelineConfig::default())
    }
}

/// Align on the blocking pool; FFmpeg work is synchronous
async fn run_align(config: AlignConfig) -> Result<Vec<AlignedSegment>> {
    tokio::task::spawn_blocking(move || Aligner::new(config)?.align())
        .await
        .map_err(|e| DatasetError::Task(format!("align task: {}", e)))?
}

async fn run_prepare(config: PrepareConfig) -> Result<DatasetSummary> {
    tokio::task::spawn_blocking(move || dataset::prepare_dataset(&config))
        .await
        .map_err(|e| DatasetError::Task(format!("prepare task: {}", e)))?
}

/// Initialize logging with tracing
fn init_logging(config: &PipelineConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tts_dataset_builder={}", config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let cli = Cli::try_parse_from([APP_NAME, "--config", "/nonexistent/config.toml", "align"])
            .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.align.threshold_secs, 5.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[align]\nthreshold = 2.0\n\n[prepare]\nspeaker_name = \"bob\"\n")
            .unwrap();

        let cli = Cli::try_parse_from([APP_NAME, "--config", path.to_str().unwrap(), "prepare"])
            .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.align.threshold_secs, 2.0);
        assert_eq!(config.prepare.speaker_name, "bob");
    }
}

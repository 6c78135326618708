//! Command-line interface
//!
//! Every flag is optional and overrides the matching configuration file
//! entry.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AlignConfig, CleanerKind, DownloadConfig, PipelineConfig, PrepareConfig};

/// Build text-to-speech datasets from YouTube videos.
#[derive(Parser, Debug, Clone)]
#[command(name = "tts-dataset-builder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download the audio and caption tracks of a video.
    Download(DownloadArgs),

    /// Cut the audio into one clip per merged subtitle cue.
    Align(AlignArgs),

    /// Build the LJSpeech layout and the columnar dataset.
    Prepare {
        /// Directory holding the aligned clips.
        #[arg(long)]
        aligned_dir: Option<PathBuf>,

        #[command(flatten)]
        args: PrepareArgs,
    },

    /// Align, then prepare from the freshly aligned clips.
    Run {
        #[command(flatten)]
        align: AlignArgs,

        #[command(flatten)]
        prepare: PrepareArgs,
    },

    /// Write a default configuration file.
    InitConfig {
        /// Destination path.
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Video URL.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Directory receiving the audio and the captions.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also fetch automatically generated captions.
    #[arg(long)]
    pub auto_captions: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AlignArgs {
    /// Source audio file.
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// SubRip transcript.
    #[arg(long)]
    pub srt: Option<PathBuf>,

    /// Output directory for the clips; must not exist.
    #[arg(long)]
    pub aligned_dir: Option<PathBuf>,

    /// Merge threshold in seconds.
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Resample clips to this rate.
    #[arg(long)]
    pub resample: Option<u32>,

    /// Channel count of the clips (1 or 2).
    #[arg(long)]
    pub channels: Option<u16>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrepareArgs {
    /// Speaker name.
    #[arg(short, long)]
    pub speaker: Option<String>,

    /// Root of the generated datasets.
    #[arg(long)]
    pub dataset_dir: Option<PathBuf>,

    /// Sample rate of the dataset audio arrays.
    #[arg(long)]
    pub dataset_rate: Option<u32>,

    /// Text cleaner.
    #[arg(long, value_enum)]
    pub cleaner: Option<CleanerKind>,
}

impl DownloadArgs {
    pub fn apply(&self, config: &mut DownloadConfig) {
        if let Some(ref url) = self.url {
            config.url = Some(url.clone());
        }
        if let Some(ref dir) = self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.auto_captions {
            config.include_auto_captions = true;
        }
    }
}

impl AlignArgs {
    pub fn apply(&self, config: &mut AlignConfig) {
        if let Some(ref audio) = self.audio {
            config.audio_path = audio.clone();
        }
        if let Some(ref srt) = self.srt {
            config.srt_path = srt.clone();
        }
        if let Some(ref dir) = self.aligned_dir {
            config.output_path = dir.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold_secs = threshold;
        }
        if self.resample.is_some() {
            config.sample_rate = self.resample;
        }
        if self.channels.is_some() {
            config.channels = self.channels;
        }
    }
}

impl PrepareArgs {
    pub fn apply(&self, config: &mut PrepareConfig) {
        if let Some(ref speaker) = self.speaker {
            config.speaker_name = speaker.clone();
        }
        if let Some(ref dir) = self.dataset_dir {
            config.output_path = dir.clone();
        }
        if let Some(rate) = self.dataset_rate {
            config.sample_rate = rate;
        }
        if let Some(cleaner) = self.cleaner {
            config.cleaner = cleaner;
        }
    }
}

impl Cli {
    /// Apply the global and subcommand flags to a loaded configuration.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }

        match &self.command {
            Command::Download(args) => args.apply(&mut config.download),
            Command::Align(args) => args.apply(&mut config.align),
            Command::Prepare { aligned_dir, args } => {
                if let Some(dir) = aligned_dir {
                    config.prepare.aligned_path = dir.clone();
                }
                args.apply(&mut config.prepare);
            }
            Command::Run { align, prepare } => {
                align.apply(&mut config.align);
                prepare.apply(&mut config.prepare);
                config.prepare.aligned_path = config.align.output_path.clone();
            }
            Command::InitConfig { .. } => {}
        }
    }
}

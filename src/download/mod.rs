//! Audio and caption download through `yt-dlp`

pub mod info;

pub use info::{CaptionTrack, VideoInfo};

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::config::DownloadConfig;
use crate::error::{DatasetError, Result};
use crate::subtitle::{parse_srt, write_srt, SubtitleCue};

/// Files produced by one download
#[derive(Debug, Clone)]
pub struct DownloadedAssets {
    pub info: VideoInfo,
    pub audio_path: PathBuf,
    pub caption_paths: Vec<PathBuf>,
}

/// Drives an external `yt-dlp` executable
pub struct YoutubeDownloader {
    program: String,
    include_auto_captions: bool,
}

impl YoutubeDownloader {
    pub fn new(config: &DownloadConfig) -> Self {
        Self {
            program: config.yt_dlp_path.clone(),
            include_auto_captions: config.include_auto_captions,
        }
    }

    /// Fetch the best audio-only stream and every caption track of `url`
    /// into `output_dir`.
    pub async fn download(&self, url: &str, output_dir: &Path) -> Result<DownloadedAssets> {
        tokio::fs::create_dir_all(output_dir).await?;

        let info = self.fetch_info(url).await?;
        let title = sanitize_title(&info.title);
        let title = if title.is_empty() { info.id.clone() } else { title };
        match info.duration {
            Some(secs) => tracing::info!("Downloading '{}' ({}, {:.0}s)", info.title, info.id, secs),
            None => tracing::info!("Downloading '{}' ({})", info.title, info.id),
        }

        let template = output_dir.join(format!("{}.%(ext)s", title));
        let stdout = self.run(&audio_args(url, &template)).await?;
        let audio_path = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| DatasetError::Download("yt-dlp did not report the audio file".into()))?;
        tracing::info!("Saved audio to {}", audio_path.display());

        let mut caption_paths = Vec::new();
        for track in info.caption_tracks(self.include_auto_captions) {
            match self.fetch_caption(url, &info.id, &track, output_dir).await {
                Ok(cues) => {
                    let path = output_dir.join(format!("{}_{}.srt", title, track.lang));
                    write_srt(&path, &cues)?;
                    tracing::info!(
                        "Saved {} {} captions '{}' to {}",
                        cues.len(),
                        if track.automatic { "automatic" } else { "uploaded" },
                        track.name.as_deref().unwrap_or(&track.lang),
                        path.display()
                    );
                    caption_paths.push(path);
                }
                Err(e) => tracing::warn!("Skipping captions '{}': {}", track.lang, e),
            }
        }
        if caption_paths.is_empty() {
            tracing::warn!("No captions saved for {}", info.id);
        }

        Ok(DownloadedAssets {
            info,
            audio_path,
            caption_paths,
        })
    }

    /// Read the video metadata without downloading media
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo> {
        let stdout = self.run(&info_args(url)).await?;
        VideoInfo::from_json(&stdout)
    }

    async fn fetch_caption(
        &self,
        url: &str,
        id: &str,
        track: &CaptionTrack,
        output_dir: &Path,
    ) -> Result<Vec<SubtitleCue>> {
        // yt-dlp names the file `<template stem>.<lang>.srt`
        let stem = output_dir.join(format!(".{}", id));
        let template = output_dir.join(format!(".{}.%(ext)s", id));
        self.run(&caption_args(url, track, &template)).await?;

        let mut fetched = stem.into_os_string();
        fetched.push(format!(".{}.srt", track.lang));
        let fetched = PathBuf::from(fetched);

        let raw = tokio::fs::read(&fetched)
            .await
            .map_err(|e| DatasetError::Download(format!("{}: {}", fetched.display(), e)))?;
        if let Err(e) = tokio::fs::remove_file(&fetched).await {
            tracing::debug!("Could not remove {}: {}", fetched.display(), e);
        }

        process_caption(&String::from_utf8_lossy(&raw))
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        tracing::debug!("{} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DatasetError::Download(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DatasetError::Download(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn info_args(url: &str) -> Vec<String> {
    ["--dump-single-json", "--skip-download", "--no-playlist", "--no-warnings", url]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn audio_args(url: &str, template: &Path) -> Vec<String> {
    vec![
        "-f".into(),
        "bestaudio".into(),
        "--no-playlist".into(),
        "--no-progress".into(),
        "-o".into(),
        template.to_string_lossy().into_owned(),
        "--print".into(),
        "after_move:filepath".into(),
        "--no-simulate".into(),
        url.into(),
    ]
}

fn caption_args(url: &str, track: &CaptionTrack, template: &Path) -> Vec<String> {
    let write = if track.automatic {
        "--write-auto-subs"
    } else {
        "--write-subs"
    };
    vec![
        "--skip-download".into(),
        "--no-playlist".into(),
        write.into(),
        "--sub-langs".into(),
        track.lang.clone(),
        "--convert-subs".into(),
        "srt".into(),
        "-o".into(),
        template.to_string_lossy().into_owned(),
        url.into(),
    ]
}

/// Parse a fetched caption track into renumbered cues with blank entries
/// dropped. A track without any usable cue is an error.
pub fn process_caption(raw: &str) -> Result<Vec<SubtitleCue>> {
    let cues: Vec<SubtitleCue> = parse_srt(raw)
        .into_iter()
        .filter(|cue| !cue.text.trim().is_empty())
        .enumerate()
        .map(|(i, cue)| SubtitleCue { index: i + 1, ..cue })
        .collect();
    if cues.is_empty() {
        return Err(DatasetError::Download("caption track has no cues".into()));
    }
    Ok(cues)
}

/// Replace characters that are not allowed in file names
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .trim_end_matches('.')
        .to_string()
}

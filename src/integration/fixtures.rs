//! Test fixtures for integration tests
//!
//! Generates subtitle files and sine-wave WAVs on the fly so the tests need
//! no media assets.

use std::path::{Path, PathBuf};

use crate::audio::write_wav;
use crate::config::{AlignConfig, CleanerKind, PrepareConfig};

/// Four short cues over six seconds of audio
pub const LECTURE_SRT: &str = "\u{feff}1\r\n\
00:00:00,000 --> 00:00:01,000\r\n\
Hello there.\r\n\
\r\n\
2\r\n\
00:00:01,000 --> 00:00:02,000\r\n\
It's 3:30 PM.\r\n\
\r\n\
3\r\n\
00:00:02,500 --> 00:00:04,500\r\n\
Dr. Smith paid $5.\r\n\
\r\n\
4\r\n\
00:00:04,500 --> 00:00:05,500\r\n\
Good bye\r\n";

/// Length of the generated lecture audio
pub const LECTURE_MS: u64 = 6000;

/// A pure tone as interleaved s16 samples
pub fn sine_wave(freq: f64, duration_ms: u64, sample_rate: u32, channels: u16) -> Vec<i16> {
    let frames = duration_ms * sample_rate as u64 / 1000;
    let mut samples = Vec::with_capacity(frames as usize * channels as usize);
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        let value = (t * freq * std::f64::consts::TAU).sin() * 0.5 * i16::MAX as f64;
        for _ in 0..channels {
            samples.push(value as i16);
        }
    }
    samples
}

/// Files of one synthetic lecture inside a scratch directory
pub struct LectureFixture {
    pub root: PathBuf,
    pub audio_path: PathBuf,
    pub srt_path: PathBuf,
}

impl LectureFixture {
    /// Write `lecture.wav` and `lecture.srt` into `root`
    pub fn create(root: &Path, sample_rate: u32, channels: u16) -> Self {
        let audio_path = root.join("lecture.wav");
        let srt_path = root.join("lecture.srt");

        let samples = sine_wave(440.0, LECTURE_MS, sample_rate, channels);
        write_wav(&audio_path, sample_rate, channels, &samples).expect("write fixture wav");
        std::fs::write(&srt_path, LECTURE_SRT).expect("write fixture srt");

        Self {
            root: root.to_path_buf(),
            audio_path,
            srt_path,
        }
    }

    pub fn align_config(&self, threshold_secs: f64) -> AlignConfig {
        AlignConfig {
            audio_path: self.audio_path.clone(),
            srt_path: self.srt_path.clone(),
            output_path: self.root.join("aligned"),
            threshold_secs,
            sample_rate: None,
            channels: None,
        }
    }

    pub fn prepare_config(&self, speaker: &str, sample_rate: u32) -> PrepareConfig {
        PrepareConfig {
            aligned_path: self.root.join("aligned"),
            output_path: self.root.join("dataset"),
            speaker_name: speaker.to_string(),
            sample_rate,
            cleaner: CleanerKind::English,
        }
    }
}

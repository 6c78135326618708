//! Subtitle handling module
//!
//! This module handles the transcript side of alignment:
//! - SubRip parsing and serialization
//! - Timestamp arithmetic at millisecond precision
//! - Merging of short cues by a duration threshold

pub mod merge;
pub mod srt;

pub use merge::merge_cues;
pub use srt::{parse_srt, read_srt, to_srt, write_srt, SubtitleCue, Timestamp};

//! SubRip (SRT) parsing and serialization

use std::fmt;
use std::ops::Sub;
use std::path::Path;

use crate::error::{DatasetError, Result};

/// Millisecond offset into a media file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse `HH:MM:SS,mmm`. A `.` is accepted in place of the comma and
    /// the fraction may have fewer than three digits.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || DatasetError::InvalidTimestamp(s.to_string());
        let s = s.trim();

        let (clock, frac) = match s.find(|c: char| c == ',' || c == '.') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut fields = [0u64; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *field = part.parse().map_err(|_| invalid())?;
        }
        let [hours, minutes, seconds] = fields;
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        let millis = if frac.is_empty() {
            0
        } else {
            if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            // "5" is 500ms, "05" is 50ms
            let scale = 10u64.pow(3 - frac.len() as u32);
            frac.parse::<u64>().map_err(|_| invalid())? * scale
        };

        hours
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(minutes * 60 + seconds))
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|ms| ms.checked_add(millis))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_secs = self.0 / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60,
            ms
        )
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0.saturating_sub(rhs.0))
    }
}

/// One subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    /// 1-based position in the file
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Text lines joined with `\n`
    pub text: String,
}

impl SubtitleCue {
    pub fn new(index: usize, start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> Timestamp {
        self.end - self.start
    }
}

/// Parse SubRip text.
///
/// Blocks that have no valid timing line are skipped with a warning.
pub fn parse_srt(input: &str) -> Vec<SubtitleCue> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in input.lines().chain(std::iter::once("")) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !block.is_empty() {
                match parse_block(&block) {
                    Some((start, end, text)) => {
                        cues.push(SubtitleCue::new(cues.len() + 1, start, end, text));
                    }
                    None => {
                        tracing::warn!("Skipping malformed subtitle block: {:?}", block);
                    }
                }
                block.clear();
            }
        } else {
            block.push(line);
        }
    }

    cues
}

fn parse_block(lines: &[&str]) -> Option<(Timestamp, Timestamp, String)> {
    // The numeric index line is optional
    let timing_pos = lines.iter().position(|l| l.contains("-->"))?;
    if timing_pos > 1 {
        return None;
    }

    let (start, end) = parse_timing_line(lines[timing_pos])?;
    let text = lines[timing_pos + 1..]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n");

    Some((start, end, text))
}

fn parse_timing_line(line: &str) -> Option<(Timestamp, Timestamp)> {
    let (start, rest) = line.split_once("-->")?;
    // Anything after the end timestamp is positioning info
    let end = rest.split_whitespace().next()?;
    let start = Timestamp::parse(start).ok()?;
    let end = Timestamp::parse(end).ok()?;
    Some((start, end))
}

/// Serialize cues as SubRip text
pub fn to_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n",
            cue.index, cue.start, cue.end, cue.text
        ));
    }
    out
}

/// Read and parse a SubRip file
pub fn read_srt<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleCue>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let cues = parse_srt(&content);
    tracing::debug!("Read {} cues from {}", cues.len(), path.display());
    Ok(cues)
}

/// Write cues to a SubRip file
pub fn write_srt<P: AsRef<Path>>(path: P, cues: &[SubtitleCue]) -> Result<()> {
    std::fs::write(path.as_ref(), to_srt(cues))?;
    Ok(())
}

//! LJSpeech `metadata.txt` rows

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{DatasetError, Result};

/// One `audio|text|text_normalized` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    /// WAV file name relative to the `wavs/` directory
    pub audio_id: String,
    pub text: String,
    pub text_normalized: String,
}

impl MetadataRow {
    pub fn new(
        audio_id: impl Into<String>,
        text: impl Into<String>,
        text_normalized: impl Into<String>,
    ) -> Self {
        Self {
            audio_id: audio_id.into(),
            text: text.into(),
            text_normalized: text_normalized.into(),
        }
    }

    /// Format as a metadata line, without the trailing newline.
    ///
    /// Pipes and line breaks inside fields would corrupt the file, so they
    /// become spaces.
    pub fn to_line(&self) -> String {
        format!(
            "{}|{}|{}",
            sanitize_field(&self.audio_id),
            sanitize_field(&self.text),
            sanitize_field(&self.text_normalized)
        )
    }

    /// Parse one metadata line
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut fields = line.trim_end_matches(|c: char| c == '\r' || c == '\n').splitn(3, '|');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(audio_id), Some(text), Some(text_normalized)) if !audio_id.is_empty() => {
                Ok(Self::new(audio_id, text, text_normalized))
            }
            _ => Err(DatasetError::Dataset(format!(
                "Malformed metadata line: {:?}",
                line
            ))),
        }
    }
}

fn sanitize_field(field: &str) -> String {
    field
        .split(|c: char| c == '|' || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write rows to `path`, one per line
pub fn write_metadata<P: AsRef<Path>>(path: P, rows: &[MetadataRow]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writeln!(writer, "{}", row.to_line())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every non-empty line of a metadata file
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<Vec<MetadataRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path)?
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(MetadataRow::parse_line)
        .collect()
}

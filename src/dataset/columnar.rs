//! Columnar dataset directory
//!
//! `<output>/<speaker>_tts/` holds:
//! - `data.jsonl`: one [`DatasetRow`] per line
//! - `dataset_info.json`: feature schema and row count
//! - `state.json`: data file list

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audio::{load_audio, TargetFormat};
use crate::config::PrepareConfig;
use crate::error::Result;

use super::metadata::read_metadata;

pub const DATA_FILE: &str = "data.jsonl";
pub const INFO_FILE: &str = "dataset_info.json";
pub const STATE_FILE: &str = "state.json";

/// One dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub audio_id: String,
    pub text: String,
    pub text_normalized: String,
    pub speaker: String,
    /// Mono samples in `[-1, 1]`
    pub audio: Vec<f32>,
    pub sample_rate: u32,
}

/// Summary of a written dataset
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub dir: PathBuf,
    pub num_rows: usize,
    pub total_ms: u64,
}

fn features() -> serde_json::Value {
    let string = json!({ "dtype": "string", "_type": "Value" });
    json!({
        "audio_id": string.clone(),
        "text": string.clone(),
        "text_normalized": string.clone(),
        "speaker": string,
        "audio": {
            "feature": { "dtype": "float32", "_type": "Value" },
            "_type": "Sequence"
        },
        "sample_rate": { "dtype": "int64", "_type": "Value" }
    })
}

/// Read `metadata.txt`, attach speaker and audio columns and write the
/// dataset directory.
pub fn create_dataset(config: &PrepareConfig) -> Result<DatasetSummary> {
    let rows = read_metadata(config.metadata_path())?;
    let wav_dir = config.wav_dir();
    let dir = config.dataset_dir();
    std::fs::create_dir_all(&dir)?;

    let file = std::fs::File::create(dir.join(DATA_FILE))?;
    let mut writer = BufWriter::new(file);
    let mut total_ms = 0u64;

    for row in &rows {
        let buffer = load_audio(wav_dir.join(&row.audio_id), TargetFormat::mono(config.sample_rate))?;
        total_ms += buffer.duration_ms();

        let record = DatasetRow {
            audio_id: row.audio_id.clone(),
            text: row.text.clone(),
            text_normalized: row.text_normalized.clone(),
            speaker: config.speaker_name.clone(),
            audio: buffer.to_mono_f32(),
            sample_rate: config.sample_rate,
        };
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;

        tracing::debug!(
            audio_id = %row.audio_id,
            samples = record.audio.len(),
            "added dataset row"
        );
    }
    writer.flush()?;

    let dataset_name = format!("{}_tts", config.speaker_name);
    let info = json!({
        "dataset_name": dataset_name,
        "description": format!("Single-speaker TTS dataset for {}", config.speaker_name),
        "features": features(),
        "num_rows": rows.len(),
        "sample_rate": config.sample_rate,
        "total_duration_ms": total_ms,
        "created_at": chrono::Utc::now().to_rfc3339(),
    });
    std::fs::write(dir.join(INFO_FILE), serde_json::to_string_pretty(&info)?)?;

    let state = json!({
        "_data_files": [{ "filename": DATA_FILE }],
        "_format": "jsonl",
        "num_rows": rows.len(),
    });
    std::fs::write(dir.join(STATE_FILE), serde_json::to_string_pretty(&state)?)?;

    tracing::info!(
        "Saved dataset {} ({} rows, {:.1}s of audio) to {}",
        dataset_name,
        rows.len(),
        total_ms as f64 / 1000.0,
        dir.display()
    );

    Ok(DatasetSummary {
        dir,
        num_rows: rows.len(),
        total_ms,
    })
}

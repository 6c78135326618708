//! LJSpeech layout
//!
//! ```text
//! <output>/<speaker>/metadata.txt
//! <output>/<speaker>/wavs/0.wav
//! <output>/<speaker>/wavs/1.wav
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::config::PrepareConfig;
use crate::error::{DatasetError, Result};
use crate::text::clean;

use super::metadata::{write_metadata, MetadataRow};

/// A `N.wav` file and its transcript `N.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPair {
    pub stem: String,
    pub wav_path: PathBuf,
    pub text_path: PathBuf,
}

impl ClipPair {
    /// File name of the wav, used as `audio_id`
    pub fn audio_id(&self) -> String {
        format!("{}.wav", self.stem)
    }
}

/// Numeric stems in numeric order, anything else after them by name
fn compare_stems(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Find the wav/txt pairs of an aligned directory.
///
/// Wavs without a transcript are skipped with a warning.
pub fn collect_pairs<P: AsRef<Path>>(dir: P) -> Result<Vec<ClipPair>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DatasetError::NotFound(dir.to_path_buf()));
    }

    let mut pairs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let wav_path = entry?.path();
        let is_wav = wav_path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("wav"))
            .unwrap_or(false);
        if !is_wav || !wav_path.is_file() {
            continue;
        }
        let Some(stem) = wav_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let text_path = wav_path.with_extension("txt");
        if !text_path.is_file() {
            tracing::warn!("No transcript for {}, skipping", wav_path.display());
            continue;
        }

        pairs.push(ClipPair {
            stem: stem.to_string(),
            wav_path: wav_path.clone(),
            text_path,
        });
    }

    pairs.sort_by(|a, b| compare_stems(&a.stem, &b.stem));
    Ok(pairs)
}

/// Build `<output>/<speaker>/metadata.txt` and `<output>/<speaker>/wavs/`
/// from the aligned directory.
pub fn convert_to_ljspeech(config: &PrepareConfig) -> Result<Vec<MetadataRow>> {
    let pairs = collect_pairs(&config.aligned_path)?;
    if pairs.is_empty() {
        return Err(DatasetError::Dataset(format!(
            "No wav/txt pairs found in {}",
            config.aligned_path.display()
        )));
    }

    let speaker_dir = config.speaker_dir();
    let wav_dir = config.wav_dir();
    std::fs::create_dir_all(&wav_dir)?;

    let mut rows = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let text = std::fs::read_to_string(&pair.text_path)?;
        let text = text.trim();
        let text_normalized = clean(text, config.cleaner);
        tracing::debug!(audio = %pair.audio_id(), normalized = %text_normalized, "prepared row");
        rows.push(MetadataRow::new(pair.audio_id(), text, text_normalized));
    }

    let metadata_path = config.metadata_path();
    write_metadata(&metadata_path, &rows)?;
    tracing::info!("Saved metadata to {}", metadata_path.display());

    for pair in &pairs {
        std::fs::copy(&pair.wav_path, wav_dir.join(pair.audio_id()))?;
    }
    tracing::info!(
        "Copied {} wav files to {}",
        pairs.len(),
        wav_dir.display()
    );
    tracing::debug!("LJSpeech layout ready in {}", speaker_dir.display());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanerKind;

    fn touch_pair(dir: &Path, stem: &str, text: &str) {
        std::fs::write(dir.join(format!("{}.wav", stem)), b"RIFF").unwrap();
        std::fs::write(dir.join(format!("{}.txt", stem)), text).unwrap();
    }

    #[test]
    fn test_collect_pairs_numeric_order() {
        let dir = tempfile::tempdir().unwrap();
        for i in [10, 2, 1, 0] {
            touch_pair(dir.path(), &i.to_string(), "x");
        }
        touch_pair(dir.path(), "extra", "x");
        // No transcript
        std::fs::write(dir.path().join("5.wav"), b"RIFF").unwrap();

        let pairs = collect_pairs(dir.path()).unwrap();
        let stems: Vec<&str> = pairs.iter().map(|p| p.stem.as_str()).collect();
        assert_eq!(stems, vec!["0", "1", "2", "10", "extra"]);
    }

    #[test]
    fn test_collect_pairs_missing_dir() {
        let result = collect_pairs("/nonexistent/aligned");
        assert!(matches!(result, Err(DatasetError::NotFound(_))));
    }

    #[test]
    fn test_convert_to_ljspeech() {
        let aligned = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        touch_pair(aligned.path(), "0", "  Dr. Who arrived at 3:00 PM.\n");
        touch_pair(aligned.path(), "1", "Bye!");

        let config = PrepareConfig {
            aligned_path: aligned.path().to_path_buf(),
            output_path: out.path().to_path_buf(),
            speaker_name: "who".to_string(),
            sample_rate: 16000,
            cleaner: CleanerKind::English,
        };
        let rows = convert_to_ljspeech(&config).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "Dr. Who arrived at 3:00 PM.");
        assert_eq!(rows[0].text_normalized, "doctor who arrived at three p m.");

        let metadata = std::fs::read_to_string(out.path().join("who/metadata.txt")).unwrap();
        assert_eq!(
            metadata,
            "0.wav|Dr. Who arrived at 3:00 PM.|doctor who arrived at three p m.\n1.wav|Bye!|bye!\n"
        );
        assert!(out.path().join("who/wavs/0.wav").is_file());
        assert!(out.path().join("who/wavs/1.wav").is_file());
    }

    #[test]
    fn test_convert_empty_dir() {
        let aligned = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let config = PrepareConfig {
            aligned_path: aligned.path().to_path_buf(),
            output_path: out.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            convert_to_ljspeech(&config),
            Err(DatasetError::Dataset(_))
        ));
    }
}

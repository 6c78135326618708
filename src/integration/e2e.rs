//! End-to-end tests: align, then prepare

use crate::align::Aligner;
use crate::audio::{load_audio, TargetFormat};
use crate::dataset::metadata::read_metadata;
use crate::dataset::{prepare_dataset, DatasetRow};
use crate::error::DatasetError;
use crate::integration::fixtures::LectureFixture;

#[test]
fn test_align_merges_short_cues() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = LectureFixture::create(dir.path(), 16000, 1);

    let segments = Aligner::new(fixture.align_config(4.0))
        .unwrap()
        .align()
        .unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].cue.text, "Hello there. It's 3:30 PM.");
    assert_eq!(segments[0].cue.start.as_millis(), 0);
    assert_eq!(segments[0].cue.end.as_millis(), 2000);
    assert_eq!(segments[1].cue.text, "Dr. Smith paid $5. Good bye");
    assert_eq!(segments[1].cue.start.as_millis(), 2500);
    assert_eq!(segments[1].cue.end.as_millis(), 5500);

    let first = load_audio(&segments[0].wav_path, TargetFormat::default()).unwrap();
    assert_eq!(first.sample_rate(), 16000);
    assert_eq!(first.duration_ms(), 2000);
    let second = load_audio(&segments[1].wav_path, TargetFormat::default()).unwrap();
    assert_eq!(second.duration_ms(), 3000);
}

#[test]
fn test_align_small_threshold_keeps_every_cue() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = LectureFixture::create(dir.path(), 16000, 2);

    let segments = Aligner::new(fixture.align_config(0.5))
        .unwrap()
        .align()
        .unwrap();

    assert_eq!(segments.len(), 4);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index, i);
        assert!(segment.wav_path.ends_with(format!("{}.wav", i)));
        assert!(segment.text_path.is_file());
    }
    let stereo = load_audio(&segments[3].wav_path, TargetFormat::default()).unwrap();
    assert_eq!(stereo.channels(), 2);
}

#[test]
fn test_align_resamples_output() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = LectureFixture::create(dir.path(), 44100, 2);
    let mut config = fixture.align_config(5.0);
    config.sample_rate = Some(22050);
    config.channels = Some(1);

    let segments = Aligner::new(config).unwrap().align().unwrap();
    let clip = load_audio(&segments[0].wav_path, TargetFormat::default()).unwrap();
    assert_eq!(clip.sample_rate(), 22050);
    assert_eq!(clip.channels(), 1);
}

#[test]
fn test_second_run_refuses_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = LectureFixture::create(dir.path(), 8000, 1);

    Aligner::new(fixture.align_config(4.0))
        .unwrap()
        .align()
        .unwrap();
    let again = Aligner::new(fixture.align_config(4.0));
    assert!(matches!(again, Err(DatasetError::OutputExists(_))));
}

#[test]
fn test_align_then_prepare() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = LectureFixture::create(dir.path(), 16000, 1);
    Aligner::new(fixture.align_config(4.0))
        .unwrap()
        .align()
        .unwrap();

    let config = fixture.prepare_config("lecturer", 8000);
    let summary = prepare_dataset(&config).unwrap();
    assert_eq!(summary.num_rows, 2);

    let rows = read_metadata(config.metadata_path()).unwrap();
    assert_eq!(rows[0].audio_id, "0.wav");
    assert_eq!(rows[0].text, "Hello there. It's 3:30 PM.");
    assert_eq!(rows[0].text_normalized, "hello there. it's three thirty p m.");
    assert_eq!(rows[1].audio_id, "1.wav");
    assert_eq!(rows[1].text_normalized, "doctor smith paid five dollars. good bye");

    assert!(config.wav_dir().join("0.wav").is_file());
    assert!(config.wav_dir().join("1.wav").is_file());

    let data = std::fs::read_to_string(summary.dir.join("data.jsonl")).unwrap();
    let records: Vec<DatasetRow> = data
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.speaker == "lecturer"));
    assert!(records.iter().all(|r| r.sample_rate == 8000));
    // 2s and 3s clips at 8kHz
    assert!((records[0].audio.len() as i64 - 16000).abs() <= 100);
    assert!((records[1].audio.len() as i64 - 24000).abs() <= 100);
    assert!(records[0].audio.iter().all(|s| s.abs() <= 1.0));
}

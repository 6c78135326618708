//! Merging of short subtitle cues

use super::srt::{SubtitleCue, Timestamp};

/// Merge consecutive cues until each merged cue spans at least `threshold`.
///
/// A cue is folded into the running one while `next.end - running.start`
/// stays below the threshold; texts are joined with a single space. The
/// result is renumbered from 1.
pub fn merge_cues(cues: &[SubtitleCue], threshold: Timestamp) -> Vec<SubtitleCue> {
    let mut iter = cues.iter();
    let mut current = match iter.next() {
        Some(first) => first.clone(),
        None => return Vec::new(),
    };

    let mut merged = Vec::with_capacity(cues.len());
    for cue in iter {
        let span = cue.end - current.start;
        if span < threshold {
            current.text.push(' ');
            current.text.push_str(&cue.text);
            current.end = cue.end;
        } else {
            merged.push(std::mem::replace(&mut current, cue.clone()));
        }
    }
    merged.push(current);

    for (i, cue) in merged.iter_mut().enumerate() {
        cue.index = i + 1;
    }

    tracing::debug!(
        "Merged {} cues into {} (threshold={}ms)",
        cues.len(),
        merged.len(),
        threshold.as_millis()
    );

    merged
}

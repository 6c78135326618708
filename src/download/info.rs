//! Video metadata as reported by `yt-dlp --dump-single-json`

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// Pseudo-language yt-dlp lists for chat replays
const LIVE_CHAT: &str = "live_chat";

/// One caption format offered for a language
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptionFormat {
    #[serde(default)]
    pub name: Option<String>,
}

/// The parts of the yt-dlp info document this tool uses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: Option<f64>,
    /// Uploaded captions, keyed by language code
    #[serde(default)]
    pub subtitles: BTreeMap<String, Vec<CaptionFormat>>,
    /// Automatically generated captions, keyed by language code
    #[serde(default)]
    pub automatic_captions: BTreeMap<String, Vec<CaptionFormat>>,
}

/// A caption track to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub lang: String,
    /// Display name, e.g. `English (auto-generated)`
    pub name: Option<String>,
    pub automatic: bool,
}

impl VideoInfo {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Caption tracks in download order: uploaded tracks first, then
    /// automatic ones for languages without an uploaded track.
    pub fn caption_tracks(&self, include_automatic: bool) -> Vec<CaptionTrack> {
        let track = |lang: &String, formats: &Vec<CaptionFormat>, automatic: bool| CaptionTrack {
            lang: lang.clone(),
            name: formats.iter().find_map(|f| f.name.clone()),
            automatic,
        };

        let mut tracks: Vec<CaptionTrack> = self
            .subtitles
            .iter()
            .filter(|(lang, _)| lang.as_str() != LIVE_CHAT)
            .map(|(lang, formats)| track(lang, formats, false))
            .collect();

        if include_automatic {
            tracks.extend(
                self.automatic_captions
                    .iter()
                    .filter(|(lang, _)| !self.subtitles.contains_key(*lang))
                    .map(|(lang, formats)| track(lang, formats, true)),
            );
        }

        tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Talk: Rust / Audio?",
        "duration": 212.0,
        "uploader": "someone",
        "subtitles": {
            "en": [{"ext": "vtt", "url": "https://example.invalid/en.vtt", "name": "English"}],
            "live_chat": [{"ext": "json"}]
        },
        "automatic_captions": {
            "en": [{"ext": "vtt"}],
            "de": [{"ext": "vtt", "name": "German (auto-generated)"}]
        }
    }"#;

    #[test]
    fn test_parse_info() {
        let info = VideoInfo::from_json(INFO).unwrap();
        assert_eq!(info.id, "dQw4w9WgXcQ");
        assert_eq!(info.title, "Talk: Rust / Audio?");
        assert_eq!(info.duration, Some(212.0));
        assert_eq!(info.subtitles["en"][0].name.as_deref(), Some("English"));
    }

    #[test]
    fn test_parse_minimal_info() {
        let info = VideoInfo::from_json(r#"{"id": "x"}"#).unwrap();
        assert!(info.subtitles.is_empty());
        assert!(info.caption_tracks(true).is_empty());
    }

    #[test]
    fn test_caption_tracks() {
        let info = VideoInfo::from_json(INFO).unwrap();

        let manual = info.caption_tracks(false);
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].lang, "en");
        assert_eq!(manual[0].name.as_deref(), Some("English"));
        assert!(!manual[0].automatic);

        let all = info.caption_tracks(true);
        let langs: Vec<&str> = all.iter().map(|t| t.lang.as_str()).collect();
        assert_eq!(langs, vec!["en", "de"]);
        assert!(all[1].automatic);
    }
}

//! Transcript cleaning pipelines

use crate::config::CleanerKind;

use super::abbreviations::expand_abbreviations;
use super::numbers::normalize_numbers;
use super::time::expand_time_english;

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Replace punctuation that has no spoken form.
pub fn replace_symbols(text: &str) -> String {
    text.replace(';', ",")
        .replace('-', " ")
        .replace(':', ",")
        .replace('&', " and ")
}

/// Drop brackets and quotes.
pub fn remove_aux_symbols(text: &str) -> String {
    regex!(r#"[<>()\[\]"]+"#).replace_all(text, "").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    regex!(r"\s+").replace_all(text, " ").trim().to_string()
}

/// Full English pipeline: times, numbers, abbreviations and symbols.
pub fn english_cleaners(text: &str) -> String {
    let text = lowercase(text);
    let text = expand_time_english(&text);
    let text = normalize_numbers(&text);
    let text = expand_abbreviations(&text);
    let text = replace_symbols(&text);
    let text = remove_aux_symbols(&text);
    collapse_whitespace(&text)
}

/// Lowercase and whitespace only.
pub fn basic_cleaners(text: &str) -> String {
    collapse_whitespace(&lowercase(text))
}

/// Run the configured pipeline.
pub fn clean(text: &str, kind: CleanerKind) -> String {
    match kind {
        CleanerKind::English => english_cleaners(text),
        CleanerKind::Basic => basic_cleaners(text),
    }
}

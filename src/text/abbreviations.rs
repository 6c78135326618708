//! English abbreviation expansion

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mrs", "misess"),
    ("mr", "mister"),
    ("dr", "doctor"),
    ("st", "saint"),
    ("co", "company"),
    ("jr", "junior"),
    ("maj", "major"),
    ("gen", "general"),
    ("drs", "doctors"),
    ("rev", "reverend"),
    ("lt", "lieutenant"),
    ("hon", "honorable"),
    ("sgt", "sergeant"),
    ("capt", "captain"),
    ("esq", "esquire"),
    ("ltd", "limited"),
    ("col", "colonel"),
    ("ft", "fort"),
];

fn patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ABBREVIATIONS
            .iter()
            .map(|(abbr, full)| {
                let re = RegexBuilder::new(&format!(r"\b{}\.", abbr))
                    .case_insensitive(true)
                    .build()
                    .unwrap();
                (re, *full)
            })
            .collect()
    })
}

/// Expand `mr.`, `dr.`, `st.` and friends.
pub fn expand_abbreviations(text: &str) -> String {
    let mut text = text.to_string();
    for (re, full) in patterns() {
        if re.is_match(&text) {
            text = re.replace_all(&text, *full).into_owned();
        }
    }
    text
}

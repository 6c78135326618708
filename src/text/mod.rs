//! Text normalization module
//!
//! Turns caption text into the spoken-form transcript used as
//! `text_normalized` in the dataset:
//! - Clock times and numbers spelled out
//! - Common English abbreviations expanded
//! - Symbols replaced or removed, whitespace collapsed

/// Compile a literal pattern once and hand out a `&'static Regex`.
/// Patterns are fixed at compile time, so a bad one panics on first use.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

pub mod abbreviations;
pub mod cleaners;
pub mod numbers;
pub mod time;

pub use cleaners::{basic_cleaners, clean, english_cleaners};

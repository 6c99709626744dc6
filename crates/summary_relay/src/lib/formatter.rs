//! # Bullet Formatter
//!
//! Reassembles per-chunk summaries into one bulleted list.
//!
//! Sentence detection is a punctuation-plus-whitespace heuristic, not a parser:
//! abbreviations ("Dr. Smith"), decimals followed by a space and quoted
//! punctuation are split like any other sentence end.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

/// Sentence terminator followed by the whitespace run that separates it from
/// the next sentence
static SENTENCE_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Bullet marker the model sometimes emits on its own
static LEADING_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s*").unwrap());

/// Sentences of this many chars or fewer are treated as noise
const MIN_SENTENCE_CHARS: usize = 3;

/// Joins partial summaries in order with a single space.
/// Empty partials are removed first so they never produce a double space.
pub fn join_partials<S: AsRef<str>>(partials: &[S]) -> String {
    partials
        .iter()
        .map(AsRef::as_ref)
        .filter(|partial| !partial.is_empty())
        .join(" ")
}

/// Splits after every `.`, `!` or `?` that is followed by whitespace.
/// The whitespace run is consumed and belongs to neither side.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY_RE.find_iter(text) {
        // terminators are single-byte, the sentence keeps its own punctuation
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);

    sentences
}

/// Renders one `- ` bullet per sentence, dropping fragments of
/// `MIN_SENTENCE_CHARS` or fewer and any bullet marker already present.
pub fn format_as_bullets(text: &str) -> String {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .map(|sentence| format!("- {}", LEADING_BULLET_RE.replace(sentence, "")))
        .join("\n")
}

/// Joins the partial summaries and formats the result as a bullet list.
/// Returns an empty string when no sentence survives.
pub fn reassemble<S: AsRef<str>>(partials: &[S]) -> String {
    format_as_bullets(&join_partials(partials))
}

//! Shared text helpers for the report heuristics.
//!
//! All offsets handed around here are byte offsets into UTF-8 strings; every
//! helper snaps to char boundaries so windows never split a code point.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of capitalized words on a single line ("Marie Curie", "Python").
pub static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: +[A-Z][a-z]+)*\b").expect("Invalid regex: capitalized run")
});

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence break"));

/// Split text into trimmed, non-empty sentences on `.`, `!` and `?`.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// First sentence containing `needle` (case-sensitive).
pub fn first_sentence_containing<'a>(text: &'a str, needle: &str) -> Option<&'a str> {
    sentences(text).into_iter().find(|s| s.contains(needle))
}

/// Number of chars (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keep at most `max` chars.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Truncate to `max` chars, appending `...` when something was cut.
pub fn ellipsize(text: &str, max: usize) -> String {
    if char_len(text) > max {
        format!("{}...", truncate_chars(text, max).trim_end())
    } else {
        text.to_string()
    }
}

/// Byte offset `n` chars before `byte_idx` (or 0).
fn chars_back(text: &str, byte_idx: usize, n: usize) -> usize {
    if n == 0 {
        return byte_idx;
    }
    text[..byte_idx]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` chars after `byte_idx` (or the end of text).
fn chars_forward(text: &str, byte_idx: usize, n: usize) -> usize {
    text[byte_idx..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| byte_idx + i)
        .unwrap_or(text.len())
}

/// Window of `radius` chars around `start..end`, trimmed.
pub fn window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let from = chars_back(text, start, radius);
    let to = chars_forward(text, end, radius);
    text[from..to].trim().to_string()
}

/// Window of `radius` chars around `start..end` with the span wrapped in `**`.
pub fn marked_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let from = chars_back(text, start, radius);
    let to = chars_forward(text, end, radius);
    format!(
        "{}**{}**{}",
        &text[from..start],
        &text[start..end],
        &text[end..to]
    )
    .trim()
    .to_string()
}

/// Capitalized-word runs in discovery order, at most `limit`.
pub fn capitalized_phrases(text: &str, limit: usize) -> Vec<String> {
    CAPITALIZED_RUN
        .find_iter(text)
        .take(limit)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First row of an ordered phrase table with a phrase contained in `haystack`.
///
/// `haystack` is expected to be lowercased already.
pub fn first_phrase_match<T: Copy + 'static>(
    table: &'static [(T, &'static [&'static str])],
    haystack: &str,
) -> Option<(T, &'static str)> {
    table.iter().find_map(|(value, phrases)| {
        phrases
            .iter()
            .copied()
            .find(|phrase| haystack.contains(phrase))
            .map(|phrase| (*value, phrase))
    })
}

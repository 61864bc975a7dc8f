//! Segments a free-text suggestion reply into a short list of lines.
//!
//! Lossy on purpose: one suggestion per non-blank line, comment lines dropped,
//! capped at `MAX_SUGGESTIONS`. Empty or all-comment input yields an empty list.

pub const MAX_SUGGESTIONS: usize = 5;

const COMMENT_MARKER: char = '#';

pub fn extract_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

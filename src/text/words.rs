//! Word counting and head-first truncation
//!
//! Lengths in MedLite are measured in whitespace-separated words. Truncation
//! always keeps the head of the text so a report is never silently cut in
//! the middle.
//!
//! # Complexity
//! O(n) where n = text length

/// Words per minute used for reading-time estimates
pub const READING_WORDS_PER_MINUTE: usize = 200;

/// Result of fitting a text into a word budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordWindow {
    /// The kept words joined by single spaces
    pub text: String,

    /// Number of words in `text`
    pub kept_words: usize,

    /// Number of words in the original text
    pub total_words: usize,
}

impl WordWindow {
    /// Whether any words were dropped
    pub fn truncated(&self) -> bool {
        self.kept_words < self.total_words
    }
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep the first `max_words` words of `text`
///
/// Whitespace between kept words is normalized to a single space. When the
/// text already fits, it is returned with normalized whitespace and
/// `kept_words == total_words`.
pub fn truncate_words(text: &str, max_words: usize) -> WordWindow {
    let words: Vec<&str> = text.split_whitespace().collect();
    let total_words = words.len();
    let kept = &words[..total_words.min(max_words)];

    WordWindow {
        text: kept.join(" "),
        kept_words: kept.len(),
        total_words,
    }
}

/// Estimated reading time in whole minutes (never zero)
pub fn reading_minutes(words: usize) -> usize {
    words / READING_WORDS_PER_MINUTE + 1
}

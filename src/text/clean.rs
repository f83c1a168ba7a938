//! Report text cleaning
//!
//! Strips administrative noise (header lines, record numbers, control
//! characters) while keeping the punctuation that carries clinical meaning:
//! `120/80`, `37.5°C`, `(normal range: 70-100)`.

use regex::Regex;
use std::sync::LazyLock;

/// Administrative header lines such as `Patient: ...`, `DOB: ...`
static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:patient(?:[ \t]+name)?|dob|date(?:[ \t]+of[ \t]+birth)?|report(?:[ \t]+date)?|physician|doctor|mrn)[ \t]*:.*$",
    )
    .expect("header pattern is valid")
});

/// Number runs of six or more digits are record identifiers, not values
static RECORD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{6,}\b").expect("record number pattern is valid"));

/// Clean raw report text before translation, summarization and extraction
///
/// Steps, in order: drop header lines, drop characters outside the clinical
/// punctuation set, drop record numbers, collapse whitespace.
pub fn clean_report_text(raw: &str) -> String {
    let without_headers = HEADER_LINE.replace_all(raw, "");

    let filtered: String = without_headers
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || is_clinical_punctuation(*c))
        .collect();

    let without_ids = RECORD_NUMBER.replace_all(&filtered, "");

    without_ids.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_clinical_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | ';'
            | ':'
            | '-'
            | '/'
            | '('
            | ')'
            | '['
            | ']'
            | '+'
            | '='
            | '%'
            | '#'
            | '&'
            | '\''
            | '"'
            | '!'
            | '?'
            | '<'
            | '>'
            | '*'
            | '°'
            | '²'
            | '³'
            | 'µ'
            | 'μ'
    )
}

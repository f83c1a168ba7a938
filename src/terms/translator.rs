//! Jargon-to-plain-language translation
//!
//! All keys are compiled into one case-insensitive alternation, longest key
//! first. Each key is anchored so it never starts or ends inside a word,
//! including keys that begin or end with punctuation such as `b.i.d.`.
//! A single left-to-right pass
//! then gives longest-match-wins at every position, table order among
//! equal lengths, and no re-scanning of inserted replacements.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::cmp::Reverse;

use super::map::TermMap;
use crate::errors::{MedliteError, Result};

/// A jargon occurrence found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    /// Matched source text, as written
    pub matched: String,
    /// Replacement phrase
    pub plain: String,
}

/// Pure translator over an immutable [`TermMap`]
#[derive(Debug, Clone)]
pub struct TermTranslator {
    map: TermMap,
    matcher: Option<Regex>,
}

impl TermTranslator {
    /// Compile the matcher for `map`
    pub fn new(map: TermMap) -> Result<Self> {
        let matcher = build_matcher(&map)?;
        Ok(Self { map, matcher })
    }

    /// The table this translator was built from
    pub fn map(&self) -> &TermMap {
        &self.map
    }

    /// Replace every jargon occurrence in `text`
    ///
    /// Non-matching text is returned untouched, byte for byte.
    pub fn translate<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(matcher) = &self.matcher else {
            return Cow::Borrowed(text);
        };

        matcher.replace_all(text, |caps: &Captures| {
            let whole = caps.get(0).expect("group 0 is always present");
            let matched = whole.as_str();
            match self.map.get(matched) {
                Some(plain) if starts_sentence(text, whole.start()) => match_case(matched, plain),
                Some(plain) => plain.to_string(),
                None => matched.to_string(),
            }
        })
    }

    /// Locate jargon occurrences without replacing them
    pub fn find_terms(&self, text: &str) -> Vec<TermMatch> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };

        matcher
            .find_iter(text)
            .filter_map(|m| {
                self.map.get(m.as_str()).map(|plain| TermMatch {
                    start: m.start(),
                    end: m.end(),
                    matched: m.as_str().to_string(),
                    plain: plain.to_string(),
                })
            })
            .collect()
    }
}

fn build_matcher(map: &TermMap) -> Result<Option<Regex>> {
    if map.is_empty() {
        return Ok(None);
    }

    // Stable sort keeps table order among equal lengths
    let mut terms: Vec<&str> = map.entries().iter().map(|e| e.term.as_str()).collect();
    terms.sort_by_key(|t| Reverse(t.chars().count()));

    let alternation = terms
        .iter()
        .map(|t| term_pattern(t))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"(?i)(?:{})", alternation))
        .map(Some)
        .map_err(|e| MedliteError::TermMap(format!("Failed to compile term matcher: {}", e)))
}

/// Pattern for one key: spaces match any whitespace run
///
/// `\b` is only meaningful next to a word character. At a punctuation edge
/// `\B` is used instead, so `b.i.d.` matches before a space or at the end
/// of the text but not inside `b.i.d.x`.
fn term_pattern(term: &str) -> String {
    let body = term
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let edge = |c: Option<char>| if c.is_some_and(is_word_char) { r"\b" } else { r"\B" };
    format!(
        "{}{}{}",
        edge(term.chars().next()),
        body,
        edge(term.chars().last())
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether the byte offset `at` opens a sentence
fn starts_sentence(text: &str, at: usize) -> bool {
    match text[..at].trim_end().chars().last() {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?' | ':' | ';'),
    }
}

/// Capitalize the replacement when the source word was capitalized
fn match_case(matched: &str, plain: &str) -> String {
    let source_upper = matched.chars().next().is_some_and(char::is_uppercase);
    let mut chars = plain.chars();
    match chars.next() {
        Some(first) if source_upper && first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => plain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(pairs: &[(&str, &str)]) -> TermTranslator {
        TermTranslator::new(TermMap::from_pairs(pairs.iter().copied()).unwrap()).unwrap()
    }

    #[test]
    fn test_simple_replacement() {
        let t = translator(&[("hypertension", "high blood pressure")]);
        assert_eq!(
            t.translate("history of hypertension."),
            "history of high blood pressure."
        );
    }

    #[test]
    fn test_case_insensitive_with_capitalization() {
        let t = translator(&[("pneumonia", "lung infection")]);
        assert_eq!(t.translate("Pneumonia was seen"), "Lung infection was seen");
        assert_eq!(t.translate("PNEUMONIA"), "Lung infection");
        assert_eq!(t.translate("no pneumonia"), "no lung infection");
        assert_eq!(t.translate("Findings: Pneumonia"), "Findings: Lung infection");
    }

    #[test]
    fn test_mid_sentence_capitals_not_carried() {
        let t = translator(&[("copd", "chronic lung disease")]);
        assert_eq!(t.translate("Patient with COPD."), "Patient with chronic lung disease.");
    }

    #[test]
    fn test_word_boundaries() {
        let t = translator(&[("ulcer", "sore")]);
        assert_eq!(t.translate("ulcerative colitis"), "ulcerative colitis");
        assert_eq!(t.translate("an ulcer, small"), "an sore, small");
    }

    #[test]
    fn test_punctuation_edged_terms() {
        let t = translator(&[
            ("b.i.d.", "twice a day"),
            ("+ve", "positive"),
            ("(ab)", "antibody"),
        ]);
        assert_eq!(
            t.translate("take one tablet b.i.d. with food"),
            "take one tablet twice a day with food"
        );
        assert_eq!(t.translate("dose B.I.D."), "dose twice a day");
        assert_eq!(t.translate("culture +ve"), "culture positive");
        assert_eq!(t.translate("titre (ab) raised"), "titre antibody raised");
        // Still never inside a word
        assert_eq!(t.translate("b.i.d.x"), "b.i.d.x");
        assert_eq!(t.translate("x+ve"), "x+ve");
        assert_eq!(t.translate("+very"), "+very");
    }

    #[test]
    fn test_longest_match_wins() {
        let t = translator(&[
            ("kidney", "bean organ"),
            ("kidney function", "how well the kidneys work"),
        ]);
        assert_eq!(
            t.translate("kidney function test"),
            "how well the kidneys work test"
        );
        assert_eq!(t.translate("left kidney"), "left bean organ");
    }

    #[test]
    fn test_phrase_spans_line_break() {
        let t = translator(&[("myocardial infarction", "heart attack")]);
        assert_eq!(t.translate("prior myocardial\ninfarction"), "prior heart attack");
    }

    #[test]
    fn test_single_pass_no_cascade() {
        let t = translator(&[("copd", "chronic lung disease"), ("chronic", "long-term")]);
        assert_eq!(t.translate("COPD"), "Chronic lung disease");
    }

    #[test]
    fn test_empty_map_is_identity() {
        let t = TermTranslator::new(TermMap::default()).unwrap();
        assert!(matches!(t.translate("anything"), Cow::Borrowed("anything")));
        assert!(t.find_terms("anything").is_empty());
    }

    #[test]
    fn test_find_terms_offsets() {
        let t = translator(&[("fever", "high temperature")]);
        let found = t.find_terms("mild Fever noted");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 5);
        assert_eq!(found[0].end, 10);
        assert_eq!(found[0].matched, "Fever");
        assert_eq!(found[0].plain, "high temperature");
    }

    #[test]
    fn test_apostrophe_terms() {
        let t = TermTranslator::new(TermMap::builtin().unwrap()).unwrap();
        assert_eq!(
            t.translate("early Parkinson's disease"),
            "early movement disorder"
        );
    }
}

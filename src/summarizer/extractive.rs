//! Built-in rule-based summarizer
//!
//! Needs no model files, so it is always available as a fallback. It pulls
//! the impression and diagnosis, then sentences that report abnormal
//! results, and otherwise falls back to the lead sentences of the report.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::{BackendOutput, LengthBounds, SummaryBackend};
use crate::text::word_count;

/// Sentences at or below this length are not used as lead sentences
const MIN_LEAD_SENTENCE_CHARS: usize = 20;

const MAX_KEY_RESULTS: usize = 3;
const MAX_LEAD_SENTENCES: usize = 3;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence pattern is valid"));

static IMPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bimpression[:\s]+(?:\d+[.)]\s*)?([^.!?]+)").expect("impression pattern is valid")
});

static DIAGNOSIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdiagnosis[:\s]+(?:\d+[.)]\s*)?([^.!?]+)").expect("diagnosis pattern is valid")
});

static RESULT_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:elevated|low|high|abnormal|positive|negative)\b")
        .expect("result flag pattern is valid")
});

static TRAILING_LIST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+$").expect("list number pattern is valid"));

pub const EXTRACTIVE_NAME: &str = "extractive";

#[derive(Debug, Clone, Copy)]
struct Sentence<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

/// Rule-based extractive backend
#[derive(Debug, Default, Clone)]
pub struct ExtractiveBackend;

impl ExtractiveBackend {
    pub fn new() -> Self {
        Self
    }

    /// Build the summary text for `text`
    pub fn extract(&self, text: &str, min_words: usize) -> String {
        let sentences = split_sentences(text);
        let mut used: HashSet<usize> = HashSet::new();
        let mut parts: Vec<String> = Vec::new();

        for (label, pattern) in [("Main findings", &IMPRESSION), ("Diagnosis", &DIAGNOSIS)] {
            if let Some(caps) = pattern.captures(text) {
                let phrase = clean_phrase(caps.get(1).map_or("", |m| m.as_str()));
                if !phrase.is_empty() {
                    parts.push(format!("{}: {}", label, phrase));
                    if let Some(whole) = caps.get(0) {
                        mark_used(&sentences, whole.start(), whole.end(), &mut used);
                    }
                }
            }
        }

        let key_results: Vec<usize> = sentences
            .iter()
            .enumerate()
            .filter(|(i, s)| !used.contains(i) && RESULT_FLAG.is_match(s.text))
            .map(|(i, _)| i)
            .take(MAX_KEY_RESULTS)
            .collect();
        if !key_results.is_empty() {
            let joined = key_results
                .iter()
                .map(|&i| sentences[i].text)
                .collect::<Vec<_>>()
                .join("; ");
            parts.push(format!("Key results: {}", joined));
            used.extend(key_results);
        }

        if parts.is_empty() {
            for (i, sentence) in sentences
                .iter()
                .enumerate()
                .filter(|(_, s)| s.text.chars().count() > MIN_LEAD_SENTENCE_CHARS)
                .take(MAX_LEAD_SENTENCES)
            {
                parts.push(sentence.text.to_string());
                used.insert(i);
            }
        }

        // Best effort toward the minimum length, in document order
        for (i, sentence) in sentences.iter().enumerate() {
            if word_count(&parts.join(" ")) >= min_words {
                break;
            }
            if used.insert(i) {
                parts.push(sentence.text.to_string());
            }
        }

        if parts.is_empty() {
            return String::new();
        }
        format!("{}.", parts.join(". "))
    }
}

impl SummaryBackend for ExtractiveBackend {
    fn name(&self) -> &str {
        EXTRACTIVE_NAME
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> anyhow::Result<BackendOutput> {
        let summary = self.extract(text, bounds.min_words);
        if summary.is_empty() {
            anyhow::bail!("no sentences to extract from");
        }
        Ok(BackendOutput::new(summary))
    }
}

fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut push = |from: usize, to: usize| {
        let raw = &text[from..to];
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let offset = raw.len() - raw.trim_start().len();
            sentences.push(Sentence {
                start: from + offset,
                end: from + offset + trimmed.len(),
                text: trimmed,
            });
        }
    };

    for end in SENTENCE_END.find_iter(text) {
        push(start, end.start());
        start = end.end();
    }
    push(start, text.len());

    sentences
}

fn mark_used(sentences: &[Sentence<'_>], start: usize, end: usize, used: &mut HashSet<usize>) {
    for (i, s) in sentences.iter().enumerate() {
        if s.start < end && start < s.end {
            used.insert(i);
        }
    }
}

fn clean_phrase(phrase: &str) -> String {
    TRAILING_LIST_NUMBER.replace(phrase.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHEST_XRAY: &str = "CHEST X-RAY REPORT CLINICAL HISTORY: Patient presents with acute onset \
        of dyspnea and chest pain. FINDINGS: The chest X-ray demonstrates bilateral lower lobe \
        consolidation consistent with pneumonia. The cardiac silhouette is within normal limits. \
        No evidence of pneumothorax or pleural effusion. IMPRESSION: 1. Bilateral lower lobe \
        pneumonia 2. No acute cardiopulmonary abnormalities 3. Recommend follow-up chest X-ray in 2 weeks";

    #[test]
    fn test_impression_first() {
        let summary = ExtractiveBackend::new().extract(CHEST_XRAY, 0);
        assert!(summary.starts_with("Main findings: Bilateral lower lobe pneumonia."));
    }

    #[test]
    fn test_key_results() {
        let text = "Hemoglobin is low at 9.1 g/dL. Potassium is high. The patient is comfortable.";
        let summary = ExtractiveBackend::new().extract(text, 0);
        assert_eq!(
            summary,
            "Key results: Hemoglobin is low at 9.1 g/dL; Potassium is high."
        );
    }

    #[test]
    fn test_lead_sentences_without_sections() {
        let text = "The patient was seen today for review. Short one. \
                    Vital signs were stable throughout the visit. \
                    Medication was continued unchanged. Follow up in one month.";
        let summary = ExtractiveBackend::new().extract(text, 0);
        assert_eq!(
            summary,
            "The patient was seen today for review. Vital signs were stable throughout the visit. \
             Medication was continued unchanged."
        );
    }

    #[test]
    fn test_min_words_adds_sentences() {
        let text = "Impression: stable small nodule. The lungs are otherwise clear. \
                    No pleural fluid is present.";
        let short = ExtractiveBackend::new().extract(text, 0);
        assert_eq!(short, "Main findings: stable small nodule.");

        let longer = ExtractiveBackend::new().extract(text, 8);
        assert_eq!(
            longer,
            "Main findings: stable small nodule. The lungs are otherwise clear."
        );
    }

    #[test]
    fn test_decimal_values_stay_in_sentence() {
        let sentences = split_sentences("Glucose 5.4 mmol/L today. Next.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Glucose 5.4 mmol/L today");
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let bounds = LengthBounds {
            min_words: 0,
            max_words: 100,
        };
        assert!(ExtractiveBackend::new().summarize("   ", bounds).is_err());
    }
}

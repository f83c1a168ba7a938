//! Key-finding extraction
//!
//! A second pass over the processed report that applies fixed pattern rules
//! and surfaces short clinical statements verbatim. Findings are never
//! summarized or translated.

pub mod rules;

use std::collections::HashSet;

use rules::{leading_clause_len, RuleKind, MIN_PHRASE_CHARS, RULES};

/// Default cap on the number of findings
pub const DEFAULT_MAX_FINDINGS: usize = 5;

/// A located candidate, before overlap and duplicate filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    /// Byte offset of the whole rule match
    pub start: usize,
    /// Byte offset one past the whole rule match
    pub end: usize,
    /// Verbatim text surfaced to the reader
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Measurement,
    Observation,
    Diagnosis,
    Status,
}

impl From<RuleKind> for FindingKind {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Measurement => FindingKind::Measurement,
            RuleKind::Observation => FindingKind::Observation,
            RuleKind::Diagnosis => FindingKind::Diagnosis,
            RuleKind::Status => FindingKind::Status,
        }
    }
}

/// Rule-based finding extractor
#[derive(Debug, Clone)]
pub struct FindingExtractor {
    max_findings: usize,
}

impl Default for FindingExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FINDINGS)
    }
}

impl FindingExtractor {
    pub fn new(max_findings: usize) -> Self {
        Self { max_findings }
    }

    pub fn max_findings(&self) -> usize {
        self.max_findings
    }

    /// Extract finding texts in document order
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_detailed(text)
            .into_iter()
            .map(|f| f.text)
            .collect()
    }

    /// Extract findings with their kind and position
    ///
    /// Candidates from all rules are ordered by start offset (rule order
    /// breaks ties). A candidate overlapping an accepted one is dropped, then
    /// duplicates are removed and the list is capped.
    pub fn extract_detailed(&self, text: &str) -> Vec<Finding> {
        let mut candidates: Vec<(usize, Finding)> = Vec::new();

        for (priority, rule) in RULES.iter().enumerate() {
            for caps in rule.pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };

                let mut start = whole.start();
                let surfaced = if rule.captures_phrase() {
                    let phrase = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                    if phrase.chars().count() <= MIN_PHRASE_CHARS {
                        continue;
                    }
                    phrase
                } else {
                    // Start at the analyte, not an earlier clause
                    let skip = caps.name("prefix").map_or(0, |p| leading_clause_len(p.as_str()));
                    start += skip;
                    whole.as_str()[skip..].trim()
                };

                candidates.push((
                    priority,
                    Finding {
                        kind: rule.kind.into(),
                        start,
                        end: whole.end(),
                        text: surfaced.to_string(),
                    },
                ));
            }
        }

        candidates.sort_by_key(|(priority, f)| (f.start, *priority));

        let mut accepted = Vec::new();
        let mut covered_until = 0;
        let mut seen = HashSet::new();

        for (_, finding) in candidates {
            if finding.start < covered_until {
                continue;
            }
            covered_until = finding.end;

            if !seen.insert(dedup_key(&finding.text)) {
                continue;
            }
            accepted.push(finding);
            if accepted.len() >= self.max_findings {
                break;
            }
        }

        accepted
    }
}

fn dedup_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_with_range() {
        let extractor = FindingExtractor::default();
        let findings = extractor.extract("Glucose 180 mg/dL (normal range: 70-100).");
        assert_eq!(findings, vec!["Glucose 180 mg/dL (normal range: 70-100)"]);
    }

    #[test]
    fn test_measurement_with_bound() {
        let extractor = FindingExtractor::default();
        let findings = extractor.extract_detailed("LDL cholesterol 165 mg/dL (<100).");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Measurement);
        assert_eq!(findings[0].text, "LDL cholesterol 165 mg/dL (<100)");
    }

    #[test]
    fn test_measurement_starts_at_analyte() {
        let extractor = FindingExtractor::default();
        let findings =
            extractor.extract_detailed("Complete blood count and glucose 180 mg/dL (70-100).");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "glucose 180 mg/dL (70-100)");
        assert_eq!(findings[0].start, 25);
    }

    #[test]
    fn test_value_without_range_is_not_a_measurement() {
        let extractor = FindingExtractor::default();
        assert!(extractor.extract("Heart rate 72 bpm.").is_empty());
    }

    #[test]
    fn test_phrase_rules() {
        let extractor = FindingExtractor::default();
        let text = "Chest film shows consolidation in the right lower lobe. \
                    IMPRESSION: Right lower lobe pneumonia.";
        let findings = extractor.extract_detailed(text);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].kind, FindingKind::Observation);
        assert_eq!(findings[0].text, "consolidation in the right lower lobe");
        assert_eq!(findings[1].kind, FindingKind::Diagnosis);
        assert_eq!(findings[1].text, "Right lower lobe pneumonia");
    }

    #[test]
    fn test_short_phrases_dropped() {
        let extractor = FindingExtractor::default();
        assert!(extractor.extract("The scan shows nothing.").is_empty());
    }

    #[test]
    fn test_overlapping_candidates_dropped() {
        let extractor = FindingExtractor::default();
        // "normal range: 70-100)" would also satisfy the status rule
        let findings = extractor.extract_detailed("Glucose 180 mg/dL (normal range: 70-100).");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Measurement);
    }

    #[test]
    fn test_duplicates_removed() {
        let extractor = FindingExtractor::default();
        let text = "Impression: mild cardiomegaly noted. Diagnosis:  Mild   cardiomegaly noted.";
        assert_eq!(extractor.extract(text), vec!["mild cardiomegaly noted"]);
    }

    #[test]
    fn test_cap_applies() {
        let extractor = FindingExtractor::new(2);
        let text = "Impression: first long finding here. \
                    Impression: second long finding here. \
                    Impression: third long finding here.";
        assert_eq!(
            extractor.extract(text),
            vec!["first long finding here", "second long finding here"]
        );
    }

    #[test]
    fn test_document_order() {
        let extractor = FindingExtractor::default();
        let text = "Elevated: liver enzymes since March. \
                    Hemoglobin 9.1 g/dL (reference 12-16).";
        let findings = extractor.extract_detailed(text);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].kind, FindingKind::Status);
        assert_eq!(findings[1].kind, FindingKind::Measurement);
        assert!(findings[0].start < findings[1].start);
    }

    #[test]
    fn test_empty_text() {
        assert!(FindingExtractor::default().extract("").is_empty());
    }
}

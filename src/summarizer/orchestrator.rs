//! Summarization orchestrator
//!
//! Coordinates one summarization request:
//! - Head-first truncation to the input word limit
//! - Primary backend, then fallback on unavailability or error
//! - Output clamp to the maximum word count
//! - Confidence grading

use tracing::{debug, info, warn};

use super::{BackendOutput, BackendRole, Confidence, LengthBounds, SummaryBackend, Warning};
use crate::errors::{MedliteError, Result};
use crate::text::{truncate_words, word_count};

/// Orchestrator limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Words kept from the input before inference
    pub max_input_length: usize,

    /// Minimum summary length, best effort
    pub summary_min_length: usize,

    /// Maximum summary length, enforced
    pub summary_max_length: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_input_length: 500,
            summary_min_length: 30,
            summary_max_length: 120,
        }
    }
}

impl SummarizerConfig {
    fn bounds(&self) -> LengthBounds {
        LengthBounds {
            min_words: self.summary_min_length.min(self.summary_max_length),
            max_words: self.summary_max_length,
        }
    }
}

/// An initialized backend or the reason it could not be initialized
pub enum BackendSlot {
    Ready(Box<dyn SummaryBackend>),
    Unavailable { model: String, reason: String },
}

impl BackendSlot {
    pub fn ready(backend: impl SummaryBackend + 'static) -> Self {
        BackendSlot::Ready(Box::new(backend))
    }

    pub fn unavailable(model: impl Into<String>, reason: impl Into<String>) -> Self {
        BackendSlot::Unavailable {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Model identifier of this slot
    pub fn model(&self) -> &str {
        match self {
            BackendSlot::Ready(backend) => backend.name(),
            BackendSlot::Unavailable { model, .. } => model,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BackendSlot::Ready(_))
    }

    fn run(&self, text: &str, bounds: LengthBounds) -> Result<BackendOutput> {
        match self {
            BackendSlot::Ready(backend) => {
                backend
                    .summarize(text, bounds)
                    .map_err(|e| MedliteError::BackendUnavailable {
                        model: backend.name().to_string(),
                        reason: format!("{:#}", e),
                    })
            }
            BackendSlot::Unavailable { model, reason } => Err(MedliteError::BackendUnavailable {
                model: model.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

impl std::fmt::Debug for BackendSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendSlot::Ready(backend) => f.debug_tuple("Ready").field(&backend.name()).finish(),
            BackendSlot::Unavailable { model, reason } => f
                .debug_struct("Unavailable")
                .field("model", model)
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Result of one orchestrated summarization
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDraft {
    /// Condensed text, clamped to the maximum length
    pub text: String,

    /// Slot that produced `text`
    pub role: BackendRole,

    /// Model identifier of that slot
    pub model: String,

    pub confidence: Confidence,

    /// Input was cut by the word limit or the model's context window
    pub truncated: bool,

    pub warnings: Vec<Warning>,

    /// The exact input handed to the backend
    pub processed_input: String,
}

/// Primary/fallback summarization orchestrator
#[derive(Debug)]
pub struct Summarizer {
    primary: BackendSlot,
    fallback: BackendSlot,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(primary: BackendSlot, fallback: BackendSlot, config: SummarizerConfig) -> Self {
        Self {
            primary,
            fallback,
            config,
        }
    }

    pub fn primary(&self) -> &BackendSlot {
        &self.primary
    }

    pub fn fallback(&self) -> &BackendSlot {
        &self.fallback
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize `text`
    ///
    /// Fails with `BackendFailure` only when neither slot produces output.
    pub fn summarize(&self, text: &str) -> Result<SummaryDraft> {
        self.summarize_with(text, str::to_string)
    }

    /// Summarize `text` after rewriting the truncated window with `prepare`
    ///
    /// The word limit applies to `text` itself, so a rewrite that adds words
    /// never cuts the report. `processed_input` stays the unrewritten window.
    pub fn summarize_with<F>(&self, text: &str, prepare: F) -> Result<SummaryDraft>
    where
        F: FnOnce(&str) -> String,
    {
        let window = truncate_words(text, self.config.max_input_length);
        let mut warnings = Vec::new();
        if window.truncated() {
            info!(
                kept = window.kept_words,
                total = window.total_words,
                "Input truncated to word limit"
            );
            warnings.push(Warning::Truncated {
                kept_words: window.kept_words,
                total_words: window.total_words,
            });
        }

        let bounds = self.config.bounds();
        let input = prepare(&window.text);

        let (role, model, output) = match self.primary.run(&input, bounds) {
            Ok(output) => (BackendRole::Primary, self.primary.model().to_string(), output),
            Err(primary_err) => {
                let primary_reason = reason_of(&primary_err);
                warn!(
                    model = self.primary.model(),
                    reason = %primary_reason,
                    "Primary backend failed, using fallback"
                );

                match self.fallback.run(&input, bounds) {
                    Ok(output) => (BackendRole::Fallback, self.fallback.model().to_string(), output),
                    Err(fallback_err) => {
                        return Err(MedliteError::BackendFailure(format!(
                            "primary '{}': {}; fallback '{}': {}",
                            self.primary.model(),
                            primary_reason,
                            self.fallback.model(),
                            reason_of(&fallback_err)
                        )));
                    }
                }
            }
        };

        if output.truncated {
            warnings.push(Warning::ContextWindow {
                model: model.clone(),
            });
        }
        let truncated = window.truncated() || output.truncated;

        let clamped = truncate_words(&output.text, bounds.max_words);
        if clamped.truncated() {
            debug!(
                from = clamped.total_words,
                to = clamped.kept_words,
                "Clamped summary to maximum length"
            );
        }

        debug!(
            role = %role,
            model = %model,
            words = word_count(&clamped.text),
            "Summary produced"
        );

        Ok(SummaryDraft {
            text: clamped.text,
            role,
            model,
            confidence: Confidence::grade(role, truncated),
            truncated,
            warnings,
            processed_input: window.text,
        })
    }
}

fn reason_of(err: &MedliteError) -> String {
    match err {
        MedliteError::BackendUnavailable { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Echoes its input, recording the words it saw
    struct EchoBackend {
        name: String,
        seen_words: Arc<AtomicUsize>,
    }

    impl EchoBackend {
        fn new(name: &str) -> (Self, Arc<AtomicUsize>) {
            let seen = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name: name.to_string(),
                    seen_words: seen.clone(),
                },
                seen,
            )
        }
    }

    impl SummaryBackend for EchoBackend {
        fn name(&self) -> &str {
            &self.name
        }

        fn summarize(&self, text: &str, _bounds: LengthBounds) -> anyhow::Result<BackendOutput> {
            self.seen_words.store(word_count(text), Ordering::SeqCst);
            Ok(BackendOutput::new(text))
        }
    }

    struct FailingBackend;

    impl SummaryBackend for FailingBackend {
        fn name(&self) -> &str {
            "broken"
        }

        fn summarize(&self, _text: &str, _bounds: LengthBounds) -> anyhow::Result<BackendOutput> {
            anyhow::bail!("out of memory")
        }
    }

    struct FixedBackend(&'static str, bool);

    impl SummaryBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn summarize(&self, _text: &str, _bounds: LengthBounds) -> anyhow::Result<BackendOutput> {
            Ok(BackendOutput {
                text: self.0.to_string(),
                truncated: self.1,
            })
        }
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_primary_used_when_ready() {
        let (primary, _) = EchoBackend::new("primary-model");
        let summarizer = Summarizer::new(
            BackendSlot::ready(primary),
            BackendSlot::ready(FailingBackend),
            SummarizerConfig::default(),
        );

        let draft = summarizer.summarize("short report text").unwrap();
        assert_eq!(draft.role, BackendRole::Primary);
        assert_eq!(draft.model, "primary-model");
        assert_eq!(draft.confidence, Confidence::High);
        assert!(!draft.truncated);
        assert!(draft.warnings.is_empty());
    }

    #[test]
    fn test_unavailable_primary_falls_back() {
        let (fallback, _) = EchoBackend::new("extractive");
        let summarizer = Summarizer::new(
            BackendSlot::unavailable("google-t5/t5-base", "not installed"),
            BackendSlot::ready(fallback),
            SummarizerConfig::default(),
        );

        let draft = summarizer.summarize("short report text").unwrap();
        assert_eq!(draft.role, BackendRole::Fallback);
        assert_eq!(draft.model, "extractive");
        assert_eq!(draft.confidence, Confidence::Medium);
        assert!(draft.warnings.is_empty());
    }

    #[test]
    fn test_runtime_error_falls_back() {
        let (fallback, _) = EchoBackend::new("extractive");
        let summarizer = Summarizer::new(
            BackendSlot::ready(FailingBackend),
            BackendSlot::ready(fallback),
            SummarizerConfig::default(),
        );

        let draft = summarizer.summarize("short report text").unwrap();
        assert_eq!(draft.role, BackendRole::Fallback);
    }

    #[test]
    fn test_both_failing_names_each_attempt() {
        let summarizer = Summarizer::new(
            BackendSlot::unavailable("google-t5/t5-base", "not installed"),
            BackendSlot::ready(FailingBackend),
            SummarizerConfig::default(),
        );

        let err = summarizer.summarize("short report text").unwrap_err();
        match err {
            MedliteError::BackendFailure(msg) => {
                assert!(msg.contains("google-t5/t5-base"));
                assert!(msg.contains("not installed"));
                assert!(msg.contains("broken"));
                assert!(msg.contains("out of memory"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_input_truncated_head_first() {
        let (primary, seen) = EchoBackend::new("primary-model");
        let summarizer = Summarizer::new(
            BackendSlot::ready(primary),
            BackendSlot::unavailable("none", "unused"),
            SummarizerConfig {
                summary_max_length: 2000,
                ..SummarizerConfig::default()
            },
        );

        let draft = summarizer.summarize(&words(1000)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 500);
        assert_eq!(draft.processed_input, words(500));
        assert!(draft.truncated);
        assert_eq!(draft.confidence, Confidence::Medium);
        assert!(matches!(
            draft.warnings[0],
            Warning::Truncated {
                kept_words: 500,
                total_words: 1000
            }
        ));
    }

    #[test]
    fn test_limit_applies_before_rewrite() {
        let (primary, seen) = EchoBackend::new("primary-model");
        let summarizer = Summarizer::new(
            BackendSlot::ready(primary),
            BackendSlot::unavailable("none", "unused"),
            SummarizerConfig {
                summary_max_length: 2000,
                ..SummarizerConfig::default()
            },
        );

        // Each word triples, so the backend sees more words than the limit
        let draft = summarizer
            .summarize_with(&words(400), |w| w.replace(' ', " and also "))
            .unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1198);
        assert_eq!(draft.processed_input, words(400));
        assert!(!draft.truncated);
        assert!(draft.warnings.is_empty());
    }

    #[test]
    fn test_output_clamped_to_max_words() {
        let (primary, _) = EchoBackend::new("primary-model");
        let summarizer = Summarizer::new(
            BackendSlot::ready(primary),
            BackendSlot::unavailable("none", "unused"),
            SummarizerConfig {
                summary_max_length: 10,
                summary_min_length: 5,
                ..SummarizerConfig::default()
            },
        );

        let draft = summarizer.summarize(&words(50)).unwrap();
        assert_eq!(draft.text, words(10));
        // Output clamping is not input truncation
        assert!(!draft.truncated);
    }

    #[test]
    fn test_short_output_not_padded() {
        let summarizer = Summarizer::new(
            BackendSlot::ready(FixedBackend("Tiny.", false)),
            BackendSlot::unavailable("none", "unused"),
            SummarizerConfig::default(),
        );

        let draft = summarizer.summarize(&words(100)).unwrap();
        assert_eq!(draft.text, "Tiny.");
    }

    #[test]
    fn test_context_window_truncation_lowers_confidence() {
        let summarizer = Summarizer::new(
            BackendSlot::unavailable("google-t5/t5-base", "not installed"),
            BackendSlot::ready(FixedBackend("Summary text.", true)),
            SummarizerConfig::default(),
        );

        let draft = summarizer.summarize("short report text").unwrap();
        assert!(draft.truncated);
        assert_eq!(draft.confidence, Confidence::Low);
        assert!(draft
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::ContextWindow { model } if model == "fixed")));
    }
}

//! Summarization backends and the orchestrator that chooses between them
//!
//! A backend is anything that maps `(text, length bounds)` to a shorter
//! text. The orchestrator owns a primary and a fallback slot, applies the
//! input/output word limits, and grades the result.

pub mod extractive;
pub mod loader;
pub mod orchestrator;
pub mod t5;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use extractive::ExtractiveBackend;
pub use loader::{load_backend, EXTRACTIVE_MODEL_ID};
pub use orchestrator::{BackendSlot, Summarizer, SummaryDraft};
pub use t5::T5Backend;

/// Word-length constraints handed to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_words: usize,
    pub max_words: usize,
}

/// What a backend returns for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOutput {
    pub text: String,
    /// The backend cut the input at its own context window
    pub truncated: bool,
}

impl BackendOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            truncated: false,
        }
    }
}

/// A summarization model
///
/// Implementations must be usable through a shared reference; any per-call
/// state (KV caches, scratch buffers) is created inside `summarize`.
pub trait SummaryBackend: Send + Sync {
    /// Model identifier, e.g. `google-t5/t5-base`
    fn name(&self) -> &str;

    fn summarize(&self, text: &str, bounds: LengthBounds) -> anyhow::Result<BackendOutput>;
}

/// Which slot produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendRole {
    Primary,
    Fallback,
}

impl fmt::Display for BackendRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendRole::Primary => write!(f, "primary"),
            BackendRole::Fallback => write!(f, "fallback"),
        }
    }
}

/// How much the reader should trust the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Grade from the producing slot and the truncation flag
    pub fn grade(role: BackendRole, truncated: bool) -> Self {
        match (role, truncated) {
            (BackendRole::Primary, false) => Confidence::High,
            (BackendRole::Fallback, true) => Confidence::Low,
            _ => Confidence::Medium,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// Non-fatal conditions carried on a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The report was cut to the input word limit
    Truncated { kept_words: usize, total_words: usize },
    /// The model cut the input at its context window
    ContextWindow { model: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Truncated {
                kept_words,
                total_words,
            } => write!(
                f,
                "Only the first {} of {} words were summarized.",
                kept_words, total_words
            ),
            Warning::ContextWindow { model } => write!(
                f,
                "The report exceeded the context window of {}; its end was not summarized.",
                model
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_grades() {
        assert_eq!(Confidence::grade(BackendRole::Primary, false), Confidence::High);
        assert_eq!(Confidence::grade(BackendRole::Primary, true), Confidence::Medium);
        assert_eq!(Confidence::grade(BackendRole::Fallback, false), Confidence::Medium);
        assert_eq!(Confidence::grade(BackendRole::Fallback, true), Confidence::Low);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BackendRole::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(BackendRole::Primary.to_string(), "primary");
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::Truncated {
            kept_words: 500,
            total_words: 1000,
        };
        assert!(w.to_string().contains("500 of 1000"));
    }
}

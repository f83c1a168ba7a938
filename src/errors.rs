//! Error types for MedLite
//!
//! Every failure the pipeline can surface to a user is a variant of
//! [`MedliteError`]. Backends speak `anyhow` internally; the orchestrator
//! folds their failures into `BackendUnavailable` / `BackendFailure`.

use thiserror::Error;

/// Main error type for the MedLite pipeline
#[derive(Error, Debug)]
pub enum MedliteError {
    /// Input text could not be used
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// A backend could not be initialized
    #[error("Backend '{model}' unavailable: {reason}")]
    BackendUnavailable { model: String, reason: String },

    /// No backend produced a summary
    #[error("Summarization failed on every backend: {0}")]
    BackendFailure(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Term table errors (duplicate or empty keys, unreadable glossary)
    #[error("Term map error: {0}")]
    TermMap(String),

    /// Summary export errors
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a report cannot be summarized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("the report is empty")]
    Empty,

    #[error("the report is too short to summarize ({chars} characters, at least {min} required)")]
    TooShort { chars: usize, min: usize },

    #[error("cannot read '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for MedLite operations
pub type Result<T> = std::result::Result<T, MedliteError>;

//! Reports and the summaries derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

use crate::errors::{InputError, Result};
use crate::summarizer::{BackendRole, Confidence, Warning};
use crate::text::words::reading_minutes;
use crate::text::word_count;

/// Name used for reports read from stdin
pub const STDIN_NAME: &str = "stdin";

/// Source format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

/// An immutable medical report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    name: String,
    format: ReportFormat,
    text: String,
}

/// Size figures for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub words: usize,
    pub chars: usize,
    pub reading_minutes: usize,
}

impl Report {
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: ReportFormat::Text,
            text: text.into(),
        }
    }

    /// Read a UTF-8 text report, or stdin when `path` is `-`
    pub fn from_path(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| InputError::Unreadable {
                    path: STDIN_NAME.to_string(),
                    reason: e.to_string(),
                })?;
            return Ok(Self::from_text(STDIN_NAME, text));
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            return Err(InputError::UnsupportedFormat(
                "PDF processing not available. Please convert to TXT format.".to_string(),
            )
            .into());
        }

        let text = std::fs::read_to_string(path).map_err(|e| InputError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_text(name, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    pub fn stats(&self) -> ReportStats {
        let words = word_count(&self.text);
        ReportStats {
            words,
            chars: self.text.chars().count(),
            reading_minutes: reading_minutes(words),
        }
    }
}

/// The artifact of one summarization request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,

    /// Patient-friendly summary
    pub body: String,

    /// Backend output before translation
    pub technical_summary: String,

    /// Verbatim findings in document order
    pub key_findings: Vec<String>,

    pub backend: BackendRole,
    pub model: String,
    pub confidence: Confidence,
    pub truncated: bool,
    pub warnings: Vec<Warning>,

    /// Words handed to the backend
    pub input_words: usize,
}

//! Display document for a summary
//!
//! The disclaimer is always the last thing a reader sees: the final block
//! of the text rendering and the final field of the JSON rendering.

use serde::Serialize;
use std::fmt::Write as _;

use super::model::{Report, Summary};
use crate::errors::Result;

pub const TITLE: &str = "MEDLITE - AI-POWERED MEDICAL REPORT SUMMARY";

pub const DISCLAIMER: &str = "MEDICAL DISCLAIMER: This summary is for educational and \
informational purposes only. It is NOT a substitute for professional medical advice, \
diagnosis, or treatment. Always consult a qualified healthcare provider about your results \
and before making any medical decision.";

pub const NO_FINDINGS: &str = "No key findings were detected.";

const RULE_WIDTH: usize = 60;

/// Rendered view of a [`Summary`]
///
/// Field order is the section order; `disclaimer` must stay last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryDocument {
    pub title: String,
    pub id: String,
    pub generated_at: String,
    pub original_file: String,
    pub backend: String,
    pub model: String,
    pub confidence: String,
    pub truncated: bool,
    pub notices: Vec<String>,
    pub patient_friendly_summary: String,
    pub key_findings: Vec<String>,
    pub technical_summary: String,
    pub disclaimer: String,
}

impl SummaryDocument {
    pub fn new(summary: &Summary, report: &Report) -> Self {
        Self {
            title: TITLE.to_string(),
            id: summary.id.to_string(),
            generated_at: summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            original_file: report.name().to_string(),
            backend: summary.backend.to_string(),
            model: summary.model.clone(),
            confidence: summary.confidence.to_string(),
            truncated: summary.truncated,
            notices: summary.warnings.iter().map(|w| w.to_string()).collect(),
            patient_friendly_summary: summary.body.clone(),
            key_findings: summary.key_findings.clone(),
            technical_summary: summary.technical_summary.clone(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Plain-text rendering
    pub fn to_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Generated: {}", self.generated_at);
        let _ = writeln!(out, "Original file: {}", self.original_file);
        let _ = writeln!(out, "Backend: {} ({})", self.backend, self.model);
        let _ = writeln!(out, "Confidence: {}", self.confidence);

        if !self.notices.is_empty() {
            out.push('\n');
            for notice in &self.notices {
                let _ = writeln!(out, "NOTE: {}", notice);
            }
        }

        section(&mut out, "PATIENT-FRIENDLY SUMMARY");
        let _ = writeln!(out, "{}", self.patient_friendly_summary);

        section(&mut out, "KEY FINDINGS");
        if self.key_findings.is_empty() {
            let _ = writeln!(out, "{}", NO_FINDINGS);
        } else {
            for (i, finding) in self.key_findings.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, finding);
            }
        }

        section(&mut out, "TECHNICAL SUMMARY");
        let _ = writeln!(out, "{}", self.technical_summary);

        out.push('\n');
        let _ = writeln!(out, "{}", rule);
        out.push_str(&self.disclaimer);
        out
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn section(out: &mut String, heading: &str) {
    let _ = write!(out, "\n{}\n{}\n", heading, "-".repeat(heading.len()));
}

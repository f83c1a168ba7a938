//! Writing formatted summaries to disk

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use super::formatter::SummaryDocument;
use super::model::Report;
use crate::errors::{MedliteError, Result};

const SUMMARY_SUFFIX: &str = "_summary";

/// Rendering format of an exported or printed summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// Render `document` in this format
    pub fn render(&self, document: &SummaryDocument) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(document.to_text()),
            OutputFormat::Json => document.to_json(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MedliteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(MedliteError::Config(format!(
                "unknown output format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// File name for the exported summary of `report`
pub fn export_file_name(report: &Report, format: OutputFormat) -> String {
    let stem: String = report
        .stem()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    let stem = match stem.trim_matches('.') {
        "" => "report",
        trimmed => trimmed,
    };
    format!("{}{}.{}", stem, SUMMARY_SUFFIX, format.extension())
}

/// Write `document` into `dir`, creating it if missing
pub fn export(
    document: &SummaryDocument,
    report: &Report,
    dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        MedliteError::Export(format!("cannot create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(export_file_name(report, format));
    let contents = format.render(document)?;
    std::fs::write(&path, contents)
        .map_err(|e| MedliteError::Export(format!("cannot write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Summary exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_stem() {
        let report = Report::from_text("blood_test.txt", "");
        assert_eq!(
            export_file_name(&report, OutputFormat::Text),
            "blood_test_summary.txt"
        );
        assert_eq!(
            export_file_name(&report, OutputFormat::Json),
            "blood_test_summary.json"
        );
    }

    #[test]
    fn test_file_name_cannot_escape_dir() {
        let report = Report::from_text("..\\..\\etc", "");
        let name = export_file_name(&report, OutputFormat::Text);
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(name.ends_with("_summary.txt"));
    }

    #[test]
    fn test_stdin_report_name() {
        let report = Report::from_text("stdin", "");
        assert_eq!(export_file_name(&report, OutputFormat::Text), "stdin_summary.txt");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }
}

//! Terminal output for the CLI
//!
//! Spinners go to stderr so stdout carries only the rendered result and can
//! be piped.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::report::{OutputFormat, ReportStats, SummaryDocument, DISCLAIMER};
use crate::terms::TermEntry;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Terminal display settings
#[derive(Debug, Clone, Copy)]
pub struct Display {
    progress: bool,
}

impl Display {
    /// `color` toggles ANSI colors process-wide
    pub fn new(color: bool, progress: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { progress }
    }

    /// Start a spinner, or nothing when progress display is off
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(SPINNER_TICK);
        Some(pb)
    }

    /// Print a rendered summary document
    pub fn print_document(&self, document: &SummaryDocument, format: OutputFormat, rendered: &str) {
        match format {
            OutputFormat::Json => println!("{}", rendered),
            OutputFormat::Text => {
                // Colorize headings and the disclaimer; the text itself is unchanged
                let body = rendered.strip_suffix(DISCLAIMER).unwrap_or(rendered);
                for line in body.lines() {
                    if line == document.title {
                        println!("{}", line.bold().cyan());
                    } else if is_heading(line) {
                        println!("{}", line.bold());
                    } else if line.starts_with("NOTE:") {
                        println!("{}", line.yellow());
                    } else {
                        println!("{}", line);
                    }
                }
                if body.len() != rendered.len() {
                    println!("{}", DISCLAIMER.yellow().bold());
                }
            }
        }
    }

    pub fn print_stats(&self, name: &str, stats: &ReportStats) {
        eprintln!(
            "{} {} ({} words, {} characters, ~{} min read)",
            "Report:".dimmed(),
            name,
            stats.words,
            stats.chars,
            stats.reading_minutes
        );
    }

    pub fn print_findings(&self, findings: &[String]) {
        if findings.is_empty() {
            println!("{}", crate::report::formatter::NO_FINDINGS.dimmed());
            return;
        }
        for (i, finding) in findings.iter().enumerate() {
            println!("{}. {}", (i + 1).to_string().green(), finding);
        }
    }

    pub fn print_terms(&self, entries: &[&TermEntry]) {
        let width = entries
            .iter()
            .map(|e| e.term.chars().count())
            .max()
            .unwrap_or(0);
        for entry in entries {
            println!(
                "{:<width$}  {}  {}",
                entry.term.cyan(),
                "->".dimmed(),
                entry.plain,
                width = width
            );
        }
        eprintln!("{}", format!("{} terms", entries.len()).dimmed());
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }
}

fn is_heading(line: &str) -> bool {
    matches!(
        line,
        "PATIENT-FRIENDLY SUMMARY" | "KEY FINDINGS" | "TECHNICAL SUMMARY"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_spinner_when_progress_off() {
        let display = Display::new(false, false);
        assert!(display.spinner("Summarizing").is_none());
    }

    #[test]
    fn test_headings() {
        assert!(is_heading("KEY FINDINGS"));
        assert!(!is_heading("Key findings"));
    }
}

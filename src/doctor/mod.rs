//! Doctor command for environment diagnostics
//!
//! Checks that a summary can actually be produced: configuration, term
//! table, installed models, compute device, memory and the export
//! directory.

use candle_core::Device;
use colored::*;
use std::path::{Path, PathBuf};
use sysinfo::System;

use crate::cli::config::Config;
use crate::summarizer::loader::is_installed;
use crate::terms::TermMap;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    /// Extra information shown on passing checks
    pub detail: Option<String>,
}

impl HealthCheck {
    fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Pass,
            detail: None,
        }
    }

    fn warn(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Warn(message.into()),
            detail: None,
        }
    }

    fn fail(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Fail(message.into()),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config(),
            self.check_terms(),
            self.check_primary_model(),
            self.check_fallback_model(),
            self.check_device(),
            self.check_memory(),
            self.check_output_dir(),
        ]
    }

    /// Check 1: Configuration values
    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::pass("Configuration"),
            Err(e) => HealthCheck::fail("Configuration", e.to_string()),
        }
    }

    /// Check 2: Term table and glossary
    fn check_terms(&self) -> HealthCheck {
        let map = match TermMap::builtin() {
            Ok(map) => map,
            Err(e) => return HealthCheck::fail("Term Map", e.to_string()),
        };
        let map = match self.config.glossary_path() {
            Some(path) => match map.with_glossary_file(&path) {
                Ok(map) => map,
                Err(e) => return HealthCheck::fail("Term Map", e.to_string()),
            },
            None => map,
        };

        let nested = map.keys_that_are_values();
        let check = HealthCheck::pass("Term Map");
        if nested.is_empty() {
            check.with_detail(format!("{} terms", map.len()))
        } else {
            check.with_detail(format!(
                "{} terms, {} replacements contain other terms (translation is single-pass)",
                map.len(),
                nested.len()
            ))
        }
    }

    /// Check 3: Primary model on disk
    fn check_primary_model(&self) -> HealthCheck {
        let model = &self.config.models.primary_model;
        if is_installed(model) {
            HealthCheck::pass("Primary Model").with_detail(model.clone())
        } else {
            HealthCheck::warn(
                "Primary Model",
                format!("{} not installed; the fallback model will be used", model),
            )
        }
    }

    /// Check 4: Fallback model on disk
    fn check_fallback_model(&self) -> HealthCheck {
        let model = &self.config.models.fallback_model;
        if is_installed(model) {
            HealthCheck::pass("Fallback Model").with_detail(model.clone())
        } else if is_installed(&self.config.models.primary_model) {
            HealthCheck::warn("Fallback Model", format!("{} not installed", model))
        } else {
            HealthCheck::fail(
                "Fallback Model",
                format!("{} not installed and no primary model available", model),
            )
        }
    }

    /// Check 5: Compute device
    fn check_device(&self) -> HealthCheck {
        match Device::cuda_if_available(0) {
            Ok(device) if device.is_cuda() => HealthCheck::pass("Compute Device").with_detail("CUDA"),
            Ok(_) => HealthCheck::pass("Compute Device").with_detail("CPU"),
            Err(e) => HealthCheck::warn("Compute Device", format!("Device probe failed: {}", e)),
        }
    }

    /// Check 6: Memory availability
    fn check_memory(&self) -> HealthCheck {
        let mut sys = System::new();
        sys.refresh_memory();

        let available_gb = sys.available_memory() / (1024 * 1024 * 1024);

        if available_gb < 1 {
            HealthCheck::warn(
                "Memory",
                format!("Less than 1GB RAM available ({} GB); large models may fail to load", available_gb),
            )
        } else {
            HealthCheck::pass("Memory").with_detail(format!("{} GB available", available_gb))
        }
    }

    /// Check 7: Export directory permissions
    fn check_output_dir(&self) -> HealthCheck {
        let dir = self.config.output_dir();
        match writable_dir(&dir) {
            Some(probe) if probe == dir => {
                HealthCheck::pass("Output Directory").with_detail(dir.display().to_string())
            }
            Some(_) => HealthCheck::pass("Output Directory")
                .with_detail(format!("{} (will be created)", dir.display())),
            None => HealthCheck::fail(
                "Output Directory",
                format!("No write permission for {}", dir.display()),
            ),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "MedLite Environment Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => match &check.detail {
                    Some(detail) => format!("{} {}", "PASS".green(), detail.dimmed()),
                    None => "PASS".green().to_string(),
                },
                HealthStatus::Warn(msg) => format!("{} {}", "WARN:".yellow(), msg),
                HealthStatus::Fail(msg) => format!("{} {}", "FAIL:".red(), msg),
            };

            println!("{:<20} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

/// The nearest existing ancestor of `dir` (or `dir` itself) if it is writable
fn writable_dir(dir: &Path) -> Option<PathBuf> {
    let existing = dir
        .ancestors()
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .find(|p| p.is_dir())?;
    let probe = existing.join(".medlite_write_test");
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            Some(existing.to_path_buf())
        }
        Err(_) => None,
    }
}

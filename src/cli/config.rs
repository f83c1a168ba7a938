//! Configuration management for MedLite
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.medlite/config.toml

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{MedliteError, Result};
use crate::report::OutputFormat;
use crate::summarizer::orchestrator::SummarizerConfig;
use crate::summarizer::EXTRACTIVE_MODEL_ID;

/// Complete configuration for MedLite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub limits: LimitsConfig,
    pub translation: TranslationConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
}

/// Backend model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Hugging Face repo id in the local cache, or a model directory
    pub primary_model: String,
    pub fallback_model: String,
}

/// Input and output size limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Words kept from the report before inference
    pub max_input_length: usize,
    /// Words
    pub summary_min_length: usize,
    /// Words
    pub summary_max_length: usize,
    /// Shortest cleaned report accepted, in characters
    pub min_input_chars: usize,
    pub max_findings: usize,
}

/// When jargon translation happens relative to summarization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationOrder {
    BeforeSummary,
    #[default]
    AfterSummary,
}

impl fmt::Display for TranslationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationOrder::BeforeSummary => write!(f, "before_summary"),
            TranslationOrder::AfterSummary => write!(f, "after_summary"),
        }
    }
}

impl FromStr for TranslationOrder {
    type Err = MedliteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.replace('-', "_").to_lowercase().as_str() {
            "before_summary" | "before" => Ok(TranslationOrder::BeforeSummary),
            "after_summary" | "after" => Ok(TranslationOrder::AfterSummary),
            other => Err(MedliteError::Config(format!(
                "Invalid translation order: {} (expected before_summary or after_summary)",
                other
            ))),
        }
    }
}

/// Jargon translation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub order: TranslationOrder,
    /// Optional TOML glossary appended to the built-in term table
    pub glossary: String,
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub format: OutputFormat,
}

/// Terminal display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_progress: bool,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            primary_model: "google-t5/t5-base".to_string(),
            fallback_model: EXTRACTIVE_MODEL_ID.to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_length: 500,
            summary_min_length: 30,
            summary_max_length: 120,
            min_input_chars: 50,
            max_findings: 5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "outputs".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_progress: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MedliteError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| MedliteError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".medlite").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.models.primary_model.trim().is_empty()
            || self.models.fallback_model.trim().is_empty()
        {
            return Err(MedliteError::Config(
                "model identifiers cannot be empty".to_string(),
            ));
        }

        if self.limits.max_input_length == 0 {
            return Err(MedliteError::Config(
                "max_input_length must be greater than 0".to_string(),
            ));
        }

        if self.limits.summary_max_length == 0 {
            return Err(MedliteError::Config(
                "summary_max_length must be greater than 0".to_string(),
            ));
        }

        if self.limits.summary_min_length > self.limits.summary_max_length {
            return Err(MedliteError::Config(
                "summary_min_length must not exceed summary_max_length".to_string(),
            ));
        }

        if self.limits.max_findings == 0 {
            return Err(MedliteError::Config(
                "max_findings must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| MedliteError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MedliteError::Config(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MedliteError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Orchestrator limits
    pub fn summarizer(&self) -> SummarizerConfig {
        SummarizerConfig {
            max_input_length: self.limits.max_input_length,
            summary_min_length: self.limits.summary_min_length,
            summary_max_length: self.limits.summary_max_length,
        }
    }

    /// Glossary path, if one is configured
    pub fn glossary_path(&self) -> Option<PathBuf> {
        let glossary = self.translation.glossary.trim();
        (!glossary.is_empty()).then(|| Self::expand_path(glossary))
    }

    /// Export directory
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.dir)
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }
}

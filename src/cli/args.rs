//! Command-line argument parsing for MedLite
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::config::{Config, TranslationOrder};
use crate::report::OutputFormat;

/// MedLite - Turn medical reports into patient-friendly summaries
#[derive(Parser, Debug)]
#[command(name = "medlite")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Turn medical reports into patient-friendly summaries with local models", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a medical report
    Summarize {
        /// Text report to summarize, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also write the summary to the output directory
        #[arg(long)]
        export: bool,

        /// Output directory for --export
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Minimum summary length in words
        #[arg(long)]
        min_length: Option<usize>,

        /// Maximum summary length in words
        #[arg(long)]
        max_length: Option<usize>,

        /// When to translate jargon
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Replace medical jargon in a report with plain language
    Translate {
        /// Text report, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Extract key findings from a report
    Findings {
        /// Text report, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the medical term table
    Terms {
        /// Only show terms containing this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Run environment diagnostics
    Doctor,

    /// Display current configuration
    Config {
        /// Write the default configuration to ~/.medlite/config.toml
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    BeforeSummary,
    AfterSummary,
}

impl From<OrderArg> for TranslationOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::BeforeSummary => TranslationOrder::BeforeSummary,
            OrderArg::AfterSummary => TranslationOrder::AfterSummary,
        }
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Apply command-line overrides to a loaded configuration
    ///
    /// The result is validated again, so `--min-length 200` with the default
    /// maximum is rejected here.
    pub fn apply_overrides(&self, config: &mut Config) -> crate::errors::Result<()> {
        if let Commands::Summarize {
            output_dir,
            format,
            min_length,
            max_length,
            order,
            ..
        } = &self.command
        {
            if let Some(dir) = output_dir {
                config.output.dir = dir.display().to_string();
            }
            if let Some(format) = format {
                config.output.format = (*format).into();
            }
            if let Some(min) = min_length {
                config.limits.summary_min_length = *min;
            }
            if let Some(max) = max_length {
                config.limits.summary_max_length = *max;
            }
            if let Some(order) = order {
                config.translation.order = (*order).into();
            }
        }
        config.validate()
    }
}

impl Verbosity {
    /// Default log filter for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

//! CLI module for MedLite
//!
//! Handles command-line argument parsing, configuration management and
//! terminal output.

pub mod args;
pub mod config;
pub mod display;

pub use args::{Args, Commands, Verbosity};
pub use config::{Config, TranslationOrder};
pub use display::Display;

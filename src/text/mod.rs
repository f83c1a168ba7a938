//! Text preparation for medical reports
//!
//! Cleaning runs before anything else touches a report; word helpers are
//! shared by the orchestrator (truncation, clamping) and the report stats.

pub mod clean;
pub mod words;

pub use clean::clean_report_text;
pub use words::{truncate_words, word_count, WordWindow};

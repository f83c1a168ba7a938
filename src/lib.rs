//! MedLite - patient-friendly medical report summaries
//!
//! Turns a medical report into a summary a patient can read: the report is
//! cleaned, condensed by a local model (with a rule-based fallback), stripped
//! of jargon, and paired with verbatim key findings and a disclaimer.
//!
//! # Architecture
//!
//! - **text**: cleaning and word-level truncation
//! - **terms**: the jargon table and its single-pass translator
//! - **summarizer**: backends and the primary/fallback orchestrator
//! - **findings**: rule-based key-finding extraction
//! - **report**: reports, summaries, formatting and export
//! - **service**: the pipeline wiring all of the above

pub mod errors;
pub mod findings;
pub mod report;
pub mod service;
pub mod summarizer;
pub mod terms;
pub mod text;

// Re-export commonly used types
pub use errors::{InputError, MedliteError, Result};
pub use service::MedliteService;

// Interface layer
pub mod cli;
pub mod doctor;

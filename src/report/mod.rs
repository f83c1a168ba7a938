//! Reports, summaries, and their rendered documents

pub mod export;
pub mod formatter;
pub mod model;

pub use export::{export, export_file_name, OutputFormat};
pub use formatter::{SummaryDocument, DISCLAIMER};
pub use model::{Report, ReportFormat, ReportStats, Summary};

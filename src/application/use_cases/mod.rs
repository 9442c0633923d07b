pub mod import_report;
pub mod summarize_report;

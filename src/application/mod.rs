pub mod use_cases;

pub use use_cases::import_report::{ImportReportUseCase, ImportedReport};
pub use use_cases::summarize_report::SummarizeReportUseCase;

// ============================================================
// IMPORT DOMAIN LAYER
// ============================================================
// Core types and value objects for tabular report imports
// No I/O, no async, no external dependencies beyond serde/regex

mod normalized_table;
mod parse_attempt;
mod raw_import;
mod report_type;
mod resolver_config;

pub use normalized_table::{CellValue, NormalizedTable, ResolvedImport, TableRow};
pub use parse_attempt::{AttemptFailure, Delimiter, ParseAttempt, TextEncoding};
pub use raw_import::RawImport;
pub use report_type::ReportType;
pub use resolver_config::ResolverConfig;

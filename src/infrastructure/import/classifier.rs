// ============================================================
// REPORT CLASSIFIER
// ============================================================
// Tell GA4 and Search Console exports apart by their columns

use std::collections::HashSet;

use crate::domain::import::{NormalizedTable, ReportType};

/// Classify a table from its lower-cased column names.
///
/// GA4 is checked before GSC, so a table carrying both signatures is GA4.
pub fn classify(table: &NormalizedTable) -> ReportType {
    let columns: HashSet<String> = table.columns().iter().map(|c| c.to_lowercase()).collect();

    if columns.contains("sessions") && columns.contains("users") {
        ReportType::GA4
    } else if columns.contains("query") && columns.contains("clicks") {
        ReportType::GSC
    } else {
        ReportType::Unknown
    }
}

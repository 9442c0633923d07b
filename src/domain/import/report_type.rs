// ============================================================
// REPORT TYPE ENUM
// ============================================================
// Semantic classification of an imported analytics export

use serde::{Deserialize, Serialize};

/// Which analytics product produced the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Google Analytics 4 (has `sessions` and `users` columns)
    #[serde(rename = "GA4")]
    GA4,

    /// Google Search Console (has `query` and `clicks` columns)
    #[serde(rename = "GSC")]
    GSC,

    /// Anything else. The table is still usable for a generic preview.
    Unknown,
}

impl ReportType {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ReportType::GA4 => "Google Analytics 4",
            ReportType::GSC => "Google Search Console",
            ReportType::Unknown => "Unrecognised export",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ReportType::Unknown)
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::GA4 => write!(f, "GA4"),
            ReportType::GSC => write!(f, "GSC"),
            ReportType::Unknown => write!(f, "Unknown"),
        }
    }
}

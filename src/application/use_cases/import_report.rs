use serde::Serialize;
use tracing::{info, warn};

use crate::domain::error::Result;
use crate::domain::import::{NormalizedTable, RawImport, ReportType, ResolvedImport, ResolverConfig};
use crate::infrastructure::import::{classify, TabularImportResolver};

/// A resolved upload and what kind of report it is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedReport {
    pub resolved: ResolvedImport,
    pub report_type: ReportType,
}

impl ImportedReport {
    pub fn table(&self) -> &NormalizedTable {
        &self.resolved.table
    }
}

pub struct ImportReportUseCase {
    resolver: TabularImportResolver,
}

impl ImportReportUseCase {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        Ok(Self {
            resolver: TabularImportResolver::new(config)?,
        })
    }

    /// Resolve and classify an upload. Parse failures come back as
    /// `AppError::Import` with the tagged `ImportError` inside.
    pub fn execute(&self, raw: &RawImport<'_>) -> Result<ImportedReport> {
        let resolved = self.resolver.resolve_detailed(raw)?;
        let report_type = classify(&resolved.table);

        if report_type.is_known() {
            info!(report_type = %report_type, "Detected report type");
        } else {
            warn!(
                columns = ?resolved.table.columns(),
                "Could not determine report type; only a generic preview is available"
            );
        }

        Ok(ImportedReport {
            resolved,
            report_type,
        })
    }
}

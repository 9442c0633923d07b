// ============================================================
// TABULAR IMPORT RESOLVER
// ============================================================
// Walk the strategy chain until one candidate yields a table

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::decoder::{decode, sniff_bom};
use super::header_locator::{locate_header, HeaderLocation};
use super::normalizer::ColumnNormalizer;
use super::strategy::{StrategyChain, StrategyOutcome};
use crate::domain::error::{AppError, ImportError};
use crate::domain::import::{
    AttemptFailure, NormalizedTable, RawImport, ResolvedImport, ResolverConfig, TextEncoding,
};

/// Finds the encoding, delimiter and header line of an uploaded export and
/// returns it as a normalized table. Holds no per-call state.
pub struct TabularImportResolver {
    config: ResolverConfig,
    normalizer: ColumnNormalizer,
}

impl TabularImportResolver {
    /// Create a resolver, rejecting an invalid configuration
    pub fn new(config: ResolverConfig) -> Result<Self, AppError> {
        config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid resolver config: {}", e))
        })?;
        let placeholder = config
            .placeholder_regex()
            .map_err(AppError::ValidationError)?;

        Ok(Self {
            config,
            normalizer: ColumnNormalizer::new(placeholder),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve an upload into a table
    pub fn resolve(&self, raw: &RawImport<'_>) -> Result<NormalizedTable, ImportError> {
        self.resolve_detailed(raw).map(|resolved| resolved.table)
    }

    /// Resolve an upload, keeping the winning strategy and what was dropped
    pub fn resolve_detailed(&self, raw: &RawImport<'_>) -> Result<ResolvedImport, ImportError> {
        let bom = sniff_bom(raw.bytes());
        let body = &raw.bytes()[bom.len..];
        let chain = StrategyChain::for_input(&self.config, &bom);

        let mut decoded: HashMap<TextEncoding, Result<(String, Option<HeaderLocation>), String>> =
            HashMap::new();
        let mut failures: Vec<AttemptFailure> = Vec::new();
        let mut empty_header: Option<Vec<String>> = None;

        for strategy in chain.strategies() {
            let (text, header) = match decoded.entry(strategy.encoding).or_insert_with(|| {
                decode(body, strategy.encoding).map(|text| {
                    let header =
                        locate_header(&text, &self.config.delimiters, &self.config.comment_marker);
                    (text, header)
                })
            }) {
                Ok((text, header)) => (text.as_str(), *header),
                Err(reason) => {
                    debug!(strategy = %strategy.name, reason = %reason, "Skipping strategy");
                    failures.push(AttemptFailure {
                        attempt: strategy.attempt(),
                        reason: reason.clone(),
                    });
                    continue;
                }
            };

            let Some(header) = header else {
                failures.push(AttemptFailure {
                    attempt: strategy.attempt(),
                    reason: "no uncommented line contains a delimiter".to_string(),
                });
                continue;
            };

            match strategy.apply(text, header, &self.config, &self.normalizer) {
                Ok(StrategyOutcome::Table(resolved)) => {
                    info!(
                        file = raw.file_name().unwrap_or("<upload>"),
                        strategy = %strategy.name,
                        header_line = ?resolved.attempt.header_line,
                        columns = resolved.table.column_count(),
                        rows = resolved.table.row_count(),
                        "Resolved import"
                    );
                    if !resolved.dropped_columns.is_empty() {
                        debug!(dropped = ?resolved.dropped_columns, "Dropped columns");
                    }
                    return Ok(resolved);
                }
                Ok(StrategyOutcome::EmptyAfterHeader(columns)) => {
                    debug!(strategy = %strategy.name, "Header found but no data rows");
                    failures.push(AttemptFailure {
                        attempt: strategy.attempt(),
                        reason: "header has no data rows".to_string(),
                    });
                    empty_header.get_or_insert(columns);
                }
                Err(failure) => {
                    debug!(strategy = %strategy.name, reason = %failure.reason, "Strategy rejected");
                    failures.push(failure);
                }
            }
        }

        if let Some(columns) = empty_header {
            warn!(file = raw.file_name().unwrap_or("<upload>"), "Import has a header but no rows");
            return Err(ImportError::EmptyAfterHeader { columns });
        }

        warn!(
            file = raw.file_name().unwrap_or("<upload>"),
            bytes = raw.len(),
            attempts = failures.len(),
            "No parse strategy produced a table"
        );
        Err(ImportError::Unparseable {
            byte_len: raw.len(),
            attempts: failures,
        })
    }
}

impl Default for TabularImportResolver {
    fn default() -> Self {
        Self {
            config: ResolverConfig::default(),
            normalizer: ColumnNormalizer::default(),
        }
    }
}

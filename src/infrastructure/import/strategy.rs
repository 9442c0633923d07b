// ============================================================
// PARSE STRATEGIES
// ============================================================
// The ordered list of encoding x delimiter candidates and the
// per-candidate parse

use csv::{ReaderBuilder, StringRecord};

use super::decoder::BomSniff;
use super::header_locator::{field_count, HeaderLocation};
use super::normalizer::ColumnNormalizer;
use crate::domain::import::{
    AttemptFailure, CellValue, Delimiter, NormalizedTable, ParseAttempt, ResolvedImport,
    ResolverConfig, TextEncoding,
};

/// One named candidate in the chain, e.g. `utf-8/comma`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategy {
    pub name: String,
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
}

/// What a strategy produced when it did not fail outright
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StrategyOutcome {
    Table(ResolvedImport),
    /// Valid header, no data rows. Only used if nothing better turns up.
    EmptyAfterHeader(Vec<String>),
}

impl ParseStrategy {
    pub fn new(encoding: TextEncoding, delimiter: Delimiter) -> Self {
        Self {
            name: format!("{}/{}", encoding, delimiter),
            encoding,
            delimiter,
        }
    }

    pub fn attempt(&self) -> ParseAttempt {
        ParseAttempt::new(self.encoding, self.delimiter)
    }

    /// Run this strategy over already-decoded text whose header line has
    /// been located with every configured delimiter
    pub(crate) fn apply(
        &self,
        text: &str,
        header: HeaderLocation,
        config: &ResolverConfig,
        normalizer: &ColumnNormalizer,
    ) -> Result<StrategyOutcome, AttemptFailure> {
        let comment_marker = config.comment_marker.as_str();
        let attempt = self.attempt().at_line(header.line_index);

        let body = text
            .get(header.byte_offset..)
            .ok_or_else(|| self.fail(attempt, "header offset is outside the text"))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());
        let mut records = reader.records();

        let header_record = match records.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(self.fail(attempt, format!("unreadable header: {}", e))),
            None => return Err(self.fail(attempt, "header line produced no record")),
        };

        let width = header_record.len();
        if width < 2 {
            return Err(self.fail(attempt, "delimiter splits the header into a single field"));
        }
        if header_record
            .iter()
            .all(|field| matches!(CellValue::parse(field), CellValue::Number(_)))
        {
            return Err(self.fail(attempt, "header line is numeric and looks like data"));
        }

        let header_line = body.lines().next().unwrap_or_default();
        if let Some(other) = config.delimiters.iter().find(|other| {
            **other != self.delimiter && field_count(header_line, **other) > width
        }) {
            return Err(self.fail(
                attempt,
                format!("header splits into more fields with {}", other),
            ));
        }

        let mut raw_rows: Vec<StringRecord> = Vec::new();
        let mut section_truncated = false;

        for result in records {
            let record =
                result.map_err(|e| self.fail(attempt, format!("unreadable row: {}", e)))?;

            if starts_new_section(body, &record, comment_marker) {
                section_truncated = true;
                break;
            }
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            if raw_rows.is_empty() && record.len() != width {
                return Err(self.fail(
                    attempt,
                    format!(
                        "first data row has {} fields, header has {}",
                        record.len(),
                        width
                    ),
                ));
            }
            if record.len() > width {
                return Err(self.fail(
                    attempt,
                    format!(
                        "data row {} has {} fields, header has {}",
                        raw_rows.len() + 1,
                        record.len(),
                        width
                    ),
                ));
            }

            raw_rows.push(record);
        }

        let plan = normalizer.plan(header_record.iter());
        if plan.keep.is_empty() {
            return Err(self.fail(attempt, "no usable column names after normalization"));
        }

        if raw_rows.is_empty() {
            return Ok(StrategyOutcome::EmptyAfterHeader(plan.columns()));
        }

        // Short rows are padded: a missing trailing field reads as empty.
        let rows: Vec<Vec<CellValue>> = raw_rows
            .iter()
            .map(|record| {
                plan.keep
                    .iter()
                    .map(|(index, _)| record.get(*index).map_or(CellValue::Empty, CellValue::parse))
                    .collect()
            })
            .collect();

        let table =
            NormalizedTable::new(plan.columns(), rows).map_err(|reason| self.fail(attempt, reason))?;

        Ok(StrategyOutcome::Table(ResolvedImport {
            table,
            attempt,
            dropped_columns: plan.dropped,
            section_truncated,
        }))
    }

    fn fail(&self, attempt: ParseAttempt, reason: impl Into<String>) -> AttemptFailure {
        AttemptFailure {
            attempt,
            reason: reason.into(),
        }
    }
}

/// A comment-marked line after a blank line starts the next section of a
/// multi-table export; the current table ends there. Comment-marked lines
/// directly under a data row are data (e.g. a `#hashtag` search query).
fn starts_new_section(body: &str, record: &StringRecord, comment_marker: &str) -> bool {
    let Some(position) = record.position() else {
        return false;
    };
    let start = position.byte() as usize;
    let (Some(before), Some(rest)) = (body.get(..start), body.get(start..)) else {
        return false;
    };

    let line = rest.trim_start_matches(['\r', '\n']);
    if !line.trim_start().starts_with(comment_marker) {
        return false;
    }

    let newlines_before = before
        .chars()
        .rev()
        .take_while(|c| *c == '\r' || *c == '\n')
        .filter(|c| *c == '\n')
        .count();
    let newlines_after = rest[..rest.len() - line.len()]
        .chars()
        .filter(|c| *c == '\n')
        .count();

    newlines_before + newlines_after >= 2
}

/// Ordered strategies for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyChain {
    strategies: Vec<ParseStrategy>,
}

impl StrategyChain {
    /// Encodings x delimiters in configured priority. A UTF-16 byte-order
    /// mark puts the matching UTF-16 encoding in front.
    pub(crate) fn for_input(config: &ResolverConfig, bom: &BomSniff) -> Self {
        let mut encodings = Vec::with_capacity(config.encodings.len() + 1);

        if let Some(encoding @ (TextEncoding::Utf16Le | TextEncoding::Utf16Be)) = bom.encoding {
            encodings.push(encoding);
        }
        for encoding in &config.encodings {
            if !encodings.contains(encoding) {
                encodings.push(*encoding);
            }
        }

        let strategies = encodings
            .iter()
            .flat_map(|encoding| {
                config
                    .delimiters
                    .iter()
                    .map(move |delimiter| ParseStrategy::new(*encoding, *delimiter))
            })
            .collect();

        Self { strategies }
    }

    pub fn strategies(&self) -> &[ParseStrategy] {
        &self.strategies
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }
}

// ============================================================
// NORMALIZED TABLE
// ============================================================
// Rectangular result of a successful import

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ParseAttempt;

/// A single cell, parsed from the raw field text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Parse a raw field. Whitespace-only fields are `Empty`, finite numbers
    /// are `Number`, everything else is kept verbatim as `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number(value),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

/// One data row; cells are in column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    cells: Vec<CellValue>,
}

impl TableRow {
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// Rectangular table with unique, trimmed column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl NormalizedTable {
    /// Build a table, enforcing that column names are unique and that every
    /// row has exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(format!("duplicate column name '{}'", column));
            }
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(format!(
                "row {} has {} values, expected {}",
                index,
                row.len(),
                columns.len()
            ));
        }

        Ok(Self {
            columns,
            rows: rows.into_iter().map(|cells| TableRow { cells }).collect(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a cell by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// A row as ordered `(column, value)` pairs
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &CellValue)>> {
        let row = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.cells.iter())
                .collect(),
        )
    }

    /// Copy of the first `n` rows
    pub fn head(&self, n: usize) -> NormalizedTable {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Render the first `n` rows as a right-aligned plain-text table
    /// without an index column.
    pub fn to_text_preview(&self, n: usize) -> String {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(n)
            .map(|row| row.cells.iter().map(|c| c.to_string()).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                rendered
                    .iter()
                    .map(|cells| cells[idx].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_left(cell, *width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = Vec::with_capacity(rendered.len() + 1);
        lines.push(format_line(self.columns.as_slice()));
        lines.extend(rendered.iter().map(|cells| format_line(cells.as_slice())));
        lines.join("\n")
    }
}

fn pad_left(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut padded = " ".repeat(width.saturating_sub(len));
    padded.push_str(value);
    padded
}

/// A resolved table together with how it was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedImport {
    pub table: NormalizedTable,

    /// The strategy that produced the table, header line included
    pub attempt: ParseAttempt,

    /// Placeholder or duplicate columns removed during normalization
    pub dropped_columns: Vec<String>,

    /// True when a later comment-marked section was cut off
    pub section_truncated: bool,
}

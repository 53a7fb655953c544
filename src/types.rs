//! Core data model types.
//!
//! Loading produces an in-memory [`Dataset`]: an ordered list of column
//! names plus row-major raw text cells. Every analysis engine reads the
//! dataset immutably and returns fresh values; nothing here mutates rows in
//! place.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Result of the shared numeric-parseability check.
///
/// All engines that care whether a cell "is a number" (type inference,
/// filtering, grouping, correlation) go through [`ParsedCell::from_raw`], so
/// they apply identical rules: a cell is numeric iff it is non-blank and,
/// after stripping thousands separators, parses as a finite `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedCell {
    /// The cell parsed as a finite number.
    Numeric(f64),
    /// The cell is blank or not a finite number.
    NotNumeric,
}

impl ParsedCell {
    /// Parse a raw cell.
    ///
    /// Thousands separators (`,`) are stripped before parsing, so `"1,234"`
    /// is numeric. Non-finite results (`inf`, `NaN`) are rejected.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::NotNumeric;
        }
        let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Numeric(v),
            _ => Self::NotNumeric,
        }
    }

    /// Returns the parsed number, if any.
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::NotNumeric => None,
        }
    }
}

/// Returns `true` for cells counted as missing (empty or whitespace-only).
pub fn is_missing(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// In-memory tabular dataset with no declared schema.
///
/// Column names are unique and keep first-seen source order. Rows are stored
/// as `Vec<Vec<String>>` with exactly one cell per column: [`Dataset::new`]
/// pads short rows with empty strings and truncates long rows, so a missing
/// trailing cell and an empty cell are indistinguishable (both "missing").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major raw text cells, one per column.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a dataset, normalizing every row to the column count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Returns the index of a column or an [`AnalysisError::UnknownColumn`].
    pub fn require_column(&self, column: &str) -> AnalysisResult<usize> {
        self.index_of(column)
            .ok_or_else(|| AnalysisError::UnknownColumn {
                column: column.to_string(),
            })
    }

    /// Raw cells of one column, in row order.
    pub fn column_values(&self, column: &str) -> AnalysisResult<Vec<&str>> {
        let idx = self.require_column(column)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Numeric-parseable cells of one column, in row order.
    ///
    /// Non-numeric and missing cells are skipped.
    pub fn numeric_values(&self, column: &str) -> AnalysisResult<Vec<f64>> {
        let idx = self.require_column(column)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| ParsedCell::from_raw(&row[idx]).as_number())
            .collect())
    }

    /// First `n` rows (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Last `n` rows (fewer if the dataset is shorter).
    pub fn tail(&self, n: usize) -> &[Vec<String>] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original columns and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

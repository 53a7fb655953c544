//! Column type inference and descriptive statistics.
//!
//! A column is classified `Numeric` when the fraction of numeric-parseable
//! cells among *all* cells (missing cells count as non-numeric) exceeds
//! [`NUMERIC_RATIO_THRESHOLD`]; otherwise it is `Text`. The threshold
//! tolerates a minority of corrupted or missing entries without flipping the
//! classification.
//!
//! Statistics are computed on demand from the dataset and never cached.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{Dataset, ParsedCell, is_missing};

/// Fraction of numeric-parseable cells above which a column is `Numeric`.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;

/// Maximum number of entries reported in [`ColumnStats::top_values`].
pub const TOP_VALUES_LIMIT: usize = 5;

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    /// More than the threshold fraction of cells parse as finite numbers.
    Numeric,
    /// Everything else.
    Text,
}

/// Descriptive statistics for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Smallest numeric value.
    pub min: f64,
    /// Largest numeric value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle values for even counts).
    pub median: f64,
    /// Sample standard deviation (Bessel-corrected, n-1 denominator).
    pub std_dev: f64,
    /// Sum of all numeric values.
    pub sum: f64,
}

/// Immutable statistics snapshot for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Inferred type.
    pub dtype: ColumnType,
    /// Total cell count (including missing cells).
    pub count: usize,
    /// Cells that are empty or whitespace-only.
    pub missing: usize,
    /// Distinct non-missing raw values.
    pub unique: usize,
    /// Numeric statistics; populated for `Numeric` columns.
    pub numeric: Option<NumericSummary>,
    /// Up to [`TOP_VALUES_LIMIT`] most frequent non-missing values with
    /// counts, ties broken by first-encountered order; populated for `Text`
    /// columns.
    pub top_values: Vec<(String, usize)>,
}

/// Classify a column and compute its statistics.
///
/// Fails with [`AnalysisError::UnknownColumn`] for a bad name, and with
/// [`AnalysisError::InsufficientData`] when a `Numeric` column holds fewer
/// than 2 numeric values (the sample standard deviation is undefined there;
/// it is surfaced explicitly rather than reported as a silent zero).
pub fn column_stats(dataset: &Dataset, column: &str) -> AnalysisResult<ColumnStats> {
    let values = dataset.column_values(column)?;

    let count = values.len();
    let missing = values.iter().filter(|v| is_missing(v)).count();
    let unique = values
        .iter()
        .filter(|v| !is_missing(v))
        .collect::<HashSet<_>>()
        .len();

    let numeric_values: Vec<f64> = values
        .iter()
        .filter_map(|v| ParsedCell::from_raw(v).as_number())
        .collect();

    let numeric_ratio = if count > 0 {
        numeric_values.len() as f64 / count as f64
    } else {
        0.0
    };

    if numeric_ratio > NUMERIC_RATIO_THRESHOLD {
        if numeric_values.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                column: column.to_string(),
                needed: 2,
                available: numeric_values.len(),
            });
        }
        Ok(ColumnStats {
            name: column.to_string(),
            dtype: ColumnType::Numeric,
            count,
            missing,
            unique,
            numeric: Some(numeric_summary(&numeric_values)),
            top_values: Vec::new(),
        })
    } else {
        Ok(ColumnStats {
            name: column.to_string(),
            dtype: ColumnType::Text,
            count,
            missing,
            unique,
            numeric: None,
            top_values: top_values(&values),
        })
    }
}

fn numeric_summary(values: &[f64]) -> NumericSummary {
    let n = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / n as f64;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = n / 2;
    let median = if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    // Callers guarantee n >= 2, so the Bessel denominator is never zero.
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    NumericSummary {
        min,
        max,
        mean,
        median,
        std_dev: variance.sqrt(),
        sum,
    }
}

/// Frequency table of non-missing values, count desc, first-seen tie-break,
/// truncated to [`TOP_VALUES_LIMIT`].
fn top_values(values: &[&str]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for &v in values {
        if !is_missing(v) {
            *counts.entry(v).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(v, c)| (v.to_string(), c))
        .collect();
    // Stable sort keeps first-insertion order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(TOP_VALUES_LIMIT);
    entries
}

/// Full frequency table of a column's raw values (blanks included), count
/// desc, ties in first-encountered order.
pub fn value_counts(dataset: &Dataset, column: &str) -> AnalysisResult<Vec<(String, usize)>> {
    let values = dataset.column_values(column)?;
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(v, c)| (v.to_string(), c))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(entries)
}

/// Whole-dataset summary: per-column statistics plus a few sample rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Ordered column names.
    pub column_names: Vec<String>,
    /// Per-column statistics, in column order.
    pub column_stats: IndexMap<String, ColumnStats>,
    /// Columns whose statistics could not be computed, with the reason.
    /// A single bad column never aborts the rest of the summary.
    pub skipped: Vec<(String, String)>,
    /// First rows of the dataset, for preview purposes.
    pub sample_rows: Vec<Vec<String>>,
}

/// Number of rows included in [`DatasetSummary::sample_rows`].
const SAMPLE_ROW_LIMIT: usize = 5;

/// Summarize every column of the dataset.
///
/// Per-column failures (a numeric column with too few numeric values) are
/// recorded in [`DatasetSummary::skipped`]; the other columns still report.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let mut column_stats = IndexMap::new();
    let mut skipped = Vec::new();

    for column in &dataset.columns {
        match self::column_stats(dataset, column) {
            Ok(stats) => {
                column_stats.insert(column.clone(), stats);
            }
            Err(e) => skipped.push((column.clone(), e.to_string())),
        }
    }

    DatasetSummary {
        rows: dataset.row_count(),
        columns: dataset.column_count(),
        column_names: dataset.columns.clone(),
        column_stats,
        skipped,
        sample_rows: dataset.head(SAMPLE_ROW_LIMIT).to_vec(),
    }
}

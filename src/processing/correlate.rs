//! Pearson correlation between two numeric columns.

use serde::Serialize;

use crate::error::AnalysisResult;
use crate::types::{Dataset, ParsedCell};

/// Outcome of a correlation computation.
///
/// Zero variance and too-few observations are normalized to [`Undefined`]
/// instead of letting a division by zero propagate as NaN or infinity.
///
/// [`Undefined`]: Correlation::Undefined
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Correlation {
    /// Pearson's r, in [-1, 1].
    Coefficient(f64),
    /// Fewer than 2 complete pairs, or zero variance in either column.
    Undefined,
}

impl Correlation {
    /// Returns the coefficient, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Coefficient(r) => Some(r),
            Self::Undefined => None,
        }
    }
}

/// Pearson correlation between `col_a` and `col_b` over pairwise-complete
/// observations (rows where both cells are numeric-parseable).
///
/// Fails with [`crate::AnalysisError::UnknownColumn`] if either column is
/// absent. Returns [`Correlation::Undefined`] when fewer than 2 complete
/// pairs exist or either column has zero variance over that subset.
pub fn correlation(dataset: &Dataset, col_a: &str, col_b: &str) -> AnalysisResult<Correlation> {
    let idx_a = dataset.require_column(col_a)?;
    let idx_b = dataset.require_column(col_b)?;

    let pairs: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let a = ParsedCell::from_raw(&row[idx_a]).as_number()?;
            let b = ParsedCell::from_raw(&row[idx_b]).as_number()?;
            Some((a, b))
        })
        .collect();

    if pairs.len() < 2 {
        return Ok(Correlation::Undefined);
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let numerator: f64 = pairs
        .iter()
        .map(|(a, b)| (a - mean_a) * (b - mean_b))
        .sum();
    let denom_a = pairs
        .iter()
        .map(|(a, _)| (a - mean_a).powi(2))
        .sum::<f64>()
        .sqrt();
    let denom_b = pairs
        .iter()
        .map(|(_, b)| (b - mean_b).powi(2))
        .sum::<f64>()
        .sqrt();

    if denom_a == 0.0 || denom_b == 0.0 {
        return Ok(Correlation::Undefined);
    }

    Ok(Correlation::Coefficient(numerator / (denom_a * denom_b)))
}

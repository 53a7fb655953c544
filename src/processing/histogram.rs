//! Equal-width histogram binning.

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};

/// Default number of bins when the caller has no preference.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// One histogram bin: `[lower, upper)` except the last bin, which includes
/// the maximum value (bin indexes are clamped, see [`histogram`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound (inclusive for the last bin).
    pub upper: f64,
    /// Number of values falling in this bin.
    pub count: usize,
}

/// Result of binning a numeric sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Histogram {
    /// Equal-width bins in ascending bound order.
    Bins(Vec<HistogramBin>),
    /// All values are identical; binning would divide by zero.
    Degenerate {
        /// The single value every observation holds.
        value: f64,
        /// Number of observations.
        count: usize,
    },
}

/// Bin `values` into `bin_count` equal-width buckets.
///
/// A value's bin index is `floor((value - min) / width)`, clamped to
/// `bin_count - 1` so the maximum value lands in the last bin instead of an
/// off-by-one overflow bin. Fails with [`AnalysisError::EmptyInput`] on an
/// empty slice; returns [`Histogram::Degenerate`] when all values are equal.
///
/// ```
/// use rust_data_analysis::processing::{histogram, Histogram};
///
/// let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 5).unwrap();
/// let Histogram::Bins(bins) = h else { panic!("expected bins") };
/// assert_eq!(bins.len(), 5);
/// assert!(bins.iter().all(|b| b.count == 1));
/// ```
pub fn histogram(values: &[f64], bin_count: usize) -> AnalysisResult<Histogram> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "histogram".to_string(),
        });
    }
    let bin_count = bin_count.max(1);

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    if min == max {
        return Ok(Histogram::Degenerate {
            value: min,
            count: values.len(),
        });
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect();

    Ok(Histogram::Bins(bins))
}

//! CSV export for datasets and filtered row subsets.

use std::path::Path;

use crate::error::AnalysisResult;
use crate::types::Dataset;

/// Write rows to `path` as UTF-8 comma-separated text.
///
/// The header row is `columns`, in the given order; each data row is padded
/// or truncated to that width. Cells are written as raw text, so a
/// subsequent load reproduces the same column order and cell values.
pub fn export_rows(
    columns: &[String],
    rows: &[Vec<String>],
    path: impl AsRef<Path>,
) -> AnalysisResult<()> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(
            (0..columns.len()).map(|idx| row.get(idx).map(String::as_str).unwrap_or("")),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a whole dataset to `path`, preserving its column order.
pub fn export_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> AnalysisResult<()> {
    export_rows(&dataset.columns, &dataset.rows, path)
}

//! `rust-data-analysis` is a small library for analyzing delimited tabular
//! files of unknown shape and encoding, without a pre-declared schema.
//!
//! Loading detects the file encoding (UTF-8 plus East-Asian legacy
//! fallbacks) and the field delimiter, then holds the table fully in memory
//! as a [`types::Dataset`] of raw text cells. The analysis engines infer
//! per-column types from the data itself and answer ad-hoc questions over
//! the immutable dataset:
//!
//! - per-column descriptive statistics and type inference
//!   ([`processing::column_stats`], [`processing::summarize`])
//! - predicate filtering ([`processing::filter`])
//! - grouped aggregation ([`processing::group_by`])
//! - pairwise Pearson correlation ([`processing::correlation`])
//! - frequency histograms ([`processing::histogram`])
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_analysis::processing::{column_stats, correlation, ColumnType, Correlation};
//! use rust_data_analysis::types::Dataset;
//!
//! let ds = Dataset::new(
//!     vec!["x".into(), "y".into(), "label".into()],
//!     vec![
//!         vec!["1".into(), "2".into(), "a".into()],
//!         vec!["2".into(), "4".into(), "b".into()],
//!         vec!["3".into(), "6".into(), "a".into()],
//!     ],
//! );
//!
//! let stats = column_stats(&ds, "x").unwrap();
//! assert_eq!(stats.dtype, ColumnType::Numeric);
//! assert_eq!(stats.numeric.unwrap().mean, 2.0);
//!
//! let label = column_stats(&ds, "label").unwrap();
//! assert_eq!(label.dtype, ColumnType::Text);
//!
//! match correlation(&ds, "x", "y").unwrap() {
//!     Correlation::Coefficient(r) => assert!((r - 1.0).abs() < 1e-12),
//!     Correlation::Undefined => unreachable!(),
//! }
//! ```
//!
//! ## Loading files
//!
//! ```no_run
//! use rust_data_analysis::ingestion::{load_from_path, LoadOptions};
//!
//! # fn main() -> Result<(), rust_data_analysis::AnalysisError> {
//! // Encoding and delimiter are auto-detected from a sample.
//! let ds = load_from_path("sales.csv", &LoadOptions::default())?;
//! println!("rows={} columns={:?}", ds.row_count(), ds.columns);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading (encoding/delimiter detection) and CSV export
//! - [`types`]: the in-memory dataset and the shared numeric-parse rule
//! - [`processing`]: statistics, filtering, grouping, correlation, histograms
//! - [`error`]: error types used across the crate
//!
//! Everything is single-threaded and synchronous; the loader is the only
//! component that performs I/O.

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};

//! Analysis engines over an in-memory [`crate::types::Dataset`].
//!
//! Every engine takes an immutable dataset reference and returns a fresh
//! result; none mutate their input, so calls are idempotent and can run in
//! any order.
//!
//! Currently implemented:
//!
//! - [`stats`]: type inference, per-column statistics, dataset summaries,
//!   value counts
//! - [`filter()`]: single-column predicate filtering
//! - [`group_by()`]: grouping with optional per-partition aggregation
//! - [`correlation()`]: pairwise-complete Pearson correlation
//! - [`histogram()`]: equal-width binning
//!
//! ## Example: stats → filter → group
//!
//! ```rust
//! use rust_data_analysis::processing::{column_stats, filter, group_by, ColumnType, FilterOp};
//! use rust_data_analysis::types::Dataset;
//!
//! let ds = Dataset::new(
//!     vec!["city".into(), "sales".into()],
//!     vec![
//!         vec!["Seoul".into(), "120".into()],
//!         vec!["Busan".into(), "80".into()],
//!         vec!["Seoul".into(), "95".into()],
//!     ],
//! );
//!
//! let stats = column_stats(&ds, "sales").unwrap();
//! assert_eq!(stats.dtype, ColumnType::Numeric);
//!
//! let big = filter(&ds, "sales", FilterOp::Ge, "90").unwrap();
//! assert_eq!(big.row_count(), 2);
//!
//! let grouped = group_by(&big, "city", Some("sales")).unwrap();
//! assert_eq!(grouped["Seoul"].count, 2);
//! assert_eq!(grouped["Seoul"].numeric.unwrap().sum, 215.0);
//! ```

pub mod correlate;
pub mod filter;
pub mod group;
pub mod histogram;
pub mod stats;

pub use correlate::{Correlation, correlation};
pub use filter::{FilterOp, filter};
pub use group::{EMPTY_GROUP_KEY, GroupAggregate, GroupNumericSummary, GroupResult, group_by};
pub use histogram::{DEFAULT_BIN_COUNT, Histogram, HistogramBin, histogram};
pub use stats::{
    ColumnStats, ColumnType, DatasetSummary, NumericSummary, column_stats, summarize, value_counts,
};

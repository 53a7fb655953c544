//! Loading and export.
//!
//! Most callers should use [`load_from_path`], which:
//!
//! - detects the file encoding from a fixed fallback chain (or tries a
//!   preferred encoding first via [`LoadOptions`])
//! - auto-detects the field delimiter by sample frequency
//! - parses records into an in-memory [`crate::types::Dataset`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! [`export_dataset`] / [`export_rows`] re-serialize data as UTF-8 CSV in
//! the original column order.

pub mod export;
pub mod loader;
pub mod observability;

pub use export::{export_dataset, export_rows};
pub use loader::{LoadOptions, load_from_bytes, load_from_path};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};

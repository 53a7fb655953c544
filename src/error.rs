use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type shared across loading, export, and the analysis engines.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV record parsing or serialization error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// None of the candidate encodings decoded the file sample cleanly.
    #[error("no candidate encoding decodes file: {}", path.display())]
    Encoding {
        /// Path of the undecodable file.
        path: PathBuf,
    },

    /// A referenced column does not exist in the dataset.
    #[error("unknown column: '{column}'")]
    UnknownColumn {
        /// The column name that was requested.
        column: String,
    },

    /// A filter operator token was not recognized.
    #[error("unknown filter operator: '{token}' (expected eq/ne/gt/lt/ge/le/contains)")]
    UnknownOperator {
        /// The raw operator token.
        token: String,
    },

    /// A numeric column holds too few numeric values for the requested
    /// statistic (sample standard deviation needs at least 2).
    #[error("column '{column}' has {available} numeric value(s); need at least {needed}")]
    InsufficientData {
        /// The column being summarized.
        column: String,
        /// Minimum number of numeric values required.
        needed: usize,
        /// Number of numeric values actually present.
        available: usize,
    },

    /// An operation that needs at least one value received an empty input.
    #[error("empty input: {context}")]
    EmptyInput {
        /// What the empty input was meant to feed.
        context: String,
    },
}

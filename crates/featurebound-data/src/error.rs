//! Input-load errors. Any of these aborts a run before the search begins.

use featurebound_core::FeatureBoundError;
use thiserror::Error;

/// Error loading or validating a training table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Target column not found: {0}")]
    MissingTargetColumn(String),

    #[error("Non-numeric value {value:?} in column {column} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Non-finite value {value} in column {column} at row {row}")]
    NonFinite {
        column: String,
        row: usize,
        value: f64,
    },

    #[error("Column {column} has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset has no rows")]
    EmptyTable,

    #[error("Invalid feature set: {0}")]
    Features(#[from] FeatureBoundError),
}

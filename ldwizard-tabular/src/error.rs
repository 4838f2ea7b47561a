//! Error types for tabular operations.

use thiserror::Error;

/// Errors from reading or validating tabular input.
///
/// Row numbers count the header as row 0; column numbers are 0-based.
#[derive(Debug, Error)]
pub enum TabularError {
    /// Input had no rows at all (not even a header)
    #[error("Tabular input is empty")]
    EmptyInput,

    /// A data row contains an empty or whitespace-only cell
    #[error("Invalid CSV file format: row {row} has no value in column {column}")]
    EmptyCell { row: usize, column: usize },

    /// A data row is wider than the header
    #[error("Invalid CSV file format: row {row} has {found} cells but only {expected} columns have a header")]
    ExtraColumns {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A data row is narrower than the header
    #[error("Invalid CSV file format: row {row} has {found} cells, expected {expected}")]
    MissingCells {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Underlying CSV reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for tabular operations.
pub type Result<T> = std::result::Result<T, TabularError>;

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the spending dashboard.
#[derive(Error, Debug)]
pub enum SpendError {
    /// The input table does not have the four expected columns.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A `date` field could not be parsed into a calendar date.
    ///
    /// `row` is the 1-based data row (header excluded).
    #[error("Invalid date {value:?} in row {row}")]
    DateParse { row: usize, value: String },

    /// An `amount` field could not be parsed as a decimal number.
    #[error("Invalid amount {value:?} in row {row}")]
    AmountParse { row: usize, value: String },

    /// A date range whose start lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be produced.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The terminal could not be set up, drawn to or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, SpendError>;

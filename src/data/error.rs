use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy of the data layer
// ---------------------------------------------------------------------------

/// Errors raised while loading the sunspot table or deriving views from it.
///
/// Ingestion errors (`MalformedRow`, `OutOfOrder`, `Csv`, `Io`) abort a load.
/// Parameter errors (`InvalidWindow`, `InvalidPeriod`) are raised before any
/// computation happens. `UnknownLabel` is a plain lookup miss.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("line {line}: malformed row: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("row {row}: date {date} does not follow the previous row (date {previous_date}, year {previous_year})")]
    OutOfOrder {
        row: usize,
        date: f64,
        previous_date: f64,
        previous_year: i32,
    },

    #[error("smoothing window must be non-negative, got {0}")]
    InvalidWindow(i64),

    #[error("cycle period must be a positive number of years, got {0}")]
    InvalidPeriod(i64),

    #[error("unknown image label '{0}'")]
    UnknownLabel(String),

    #[error("invalid image table: {0}")]
    ImageTable(#[from] serde_json::Error),

    #[error("image table entry '{0}' has an empty locator")]
    EmptyLocator(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

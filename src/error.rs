//! Error types for the forecasting library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid simulation or model configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Too few prices to estimate a sample variance
    #[error("Insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A price that cannot be used in a log return
    #[error("Invalid price {value} at index {index}: prices must be finite and positive")]
    InvalidPrice { index: usize, value: f64 },

    /// Unparsable row in a price file
    #[error("Failed to parse price on line {line}: {content:?}")]
    Parse { line: usize, content: String },

    /// CSV header without a recognizable price column
    #[error("No price column (close, adj close, price) in header: {0}")]
    MissingPriceColumn(String),

    /// Price file without any prices
    #[error("Price series is empty")]
    EmptySeries,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for configuration errors
    pub fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

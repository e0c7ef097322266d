use thiserror::Error;

/// Failures that abort an operation outright. Per-row problems during a
/// batch import are not errors in this sense; they are collected as
/// strings inside `ImportResult` and the batch keeps going.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File is not valid delimited text: {message}")]
    ParseError { message: String },

    #[error("Store rejected the request: {message}")]
    StoreError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Another import is already in progress")]
    OperationInFlight,
}

pub type Result<T> = std::result::Result<T, ImportError>;

//! Error types for ta-core

use thiserror::Error;

/// Core error type for Trusted Advisor Explorer
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: One or more required configuration keys are missing
    #[error("[C001] Missing required configuration keys: {}", keys.join(", "))]
    MissingConfig { keys: Vec<String> },

    /// C002: A configuration value could not be interpreted
    #[error("[C002] Invalid value for '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    /// C003: A schema entry points past the end of a resource's metadata
    #[error("[C003] Schema index {index} out of range for check {check_id} (metadata has {len} values)")]
    SchemaIndexOutOfRange {
        check_id: String,
        index: usize,
        len: usize,
    },

    /// C004: A schema entry names a field the resource does not carry
    #[error("[C004] Unknown resource field '{field}' in schema for check {check_id}")]
    UnknownResourceField { check_id: String, field: String },

    /// C005: An account input file row does not have exactly three fields
    #[error("[C005] Insufficient fields in input file at line {line}: expected AccountId, AccountName and AccountEmail")]
    InvalidAccountRow { line: usize },

    /// C006: A required field is missing from an invocation event
    #[error("[C006] Event is missing required field '{field}'")]
    MissingEventField { field: String },

    /// C007: IO error
    #[error("[C007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C008: CSV read/write error
    #[error("[C008] CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

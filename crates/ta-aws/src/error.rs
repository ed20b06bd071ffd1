//! Error types for ta-aws

use thiserror::Error;

/// Failures of calls to AWS services
#[derive(Error, Debug)]
pub enum AwsError {
    /// The member account refused the cross-account role (A001)
    #[error("[A001] AssumeRole denied for account {account_id}: {message}")]
    AssumeRoleDenied { account_id: String, message: String },

    /// An AWS API call was rejected or failed in transit (A002)
    #[error("[A002] {operation} failed: {message}")]
    Service { operation: String, message: String },

    /// A successful response lacked a field the pipeline depends on (A003)
    #[error("[A003] {operation} response is missing '{field}'")]
    MissingField { operation: String, field: String },

    /// Local file access while staging an upload (A004)
    #[error("[A004] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AwsError {
    pub fn service(operation: &str, message: impl Into<String>) -> Self {
        AwsError::Service {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_field(operation: &str, field: &str) -> Self {
        AwsError::MissingField {
            operation: operation.to_string(),
            field: field.to_string(),
        }
    }
}

/// Result type alias for AwsError
pub type AwsResult<T> = Result<T, AwsError>;

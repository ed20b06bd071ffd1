//! Error surfaced to the workflow engine by every handler.

use ta_aws::AwsError;
use ta_core::Masker;
use thiserror::Error;

/// Handler failure as reported to Step Functions.
///
/// Messages are masked before the error is built, so the text that reaches
/// the workflow history never carries raw account identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The member account refused the cross-account role (P001)
    #[error("[P001] AssumeRole denied: {0}")]
    AssumeRoleDenied(String),

    /// An AWS API call was rejected (P002)
    #[error("[P002] Unexpected client error {0}")]
    Client(String),

    /// Anything else: bad input, configuration, local IO (P003)
    #[error("[P003] Unexpected exception: {0}")]
    Unknown(String),
}

impl PipelineError {
    /// Classify a handler failure and mask its message.
    pub fn classify(err: &anyhow::Error, masker: Masker) -> Self {
        let message = masker.mask_text(&format!("{:#}", err)).into_owned();
        match err.downcast_ref::<AwsError>() {
            Some(AwsError::AssumeRoleDenied { .. }) => PipelineError::AssumeRoleDenied(message),
            Some(AwsError::Service { .. }) | Some(AwsError::MissingField { .. }) => {
                PipelineError::Client(message)
            }
            _ => PipelineError::Unknown(message),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

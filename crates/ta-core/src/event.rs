//! Records exchanged with the workflow engine.
//!
//! Field names are PascalCase on the wire because the state machine
//! definitions reference them directly (`$.AccountId`, `$.WaitTimeInSec`).

use crate::ids::{AccountId, CheckId};
use crate::refresh::RefreshStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Date stamps shared by every record of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    /// `MM-DD-YYYY`
    pub date: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub date_time: String,
}

impl RunStamp {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            date: now.format("%m-%d-%Y").to_string(),
            date_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One member account to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRecord {
    pub account_id: AccountId,
    pub account_name: String,
    pub account_email: String,
    pub date: String,
    pub date_time: String,
}

impl AccountRecord {
    pub fn new(
        account_id: AccountId,
        account_name: impl Into<String>,
        account_email: impl Into<String>,
        stamp: &RunStamp,
    ) -> Self {
        Self {
            account_id,
            account_name: account_name.into(),
            account_email: account_email.into(),
            date: stamp.date.clone(),
            date_time: stamp.date_time.clone(),
        }
    }
}

/// One (account, check) pair for the per-check workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckRecord {
    pub check_id: CheckId,
    pub check_name: String,
    pub category: String,
    pub language: String,
    #[serde(flatten)]
    pub account: AccountRecord,
}

/// One (account, region, resource type) triple for tag extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagTaskRecord {
    pub resource_type: String,
    pub region: String,
    #[serde(flatten)]
    pub account: AccountRecord,
}

/// Input of the refresh and verify steps.
///
/// Only the account and check are required; every other field the workflow
/// passes along is echoed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckRefreshRequest {
    pub account_id: AccountId,
    pub check_id: CheckId,
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

/// Keys this pipeline writes onto refresh records; stale copies from a
/// previous step are dropped before echoing.
const REFRESH_OUTPUT_KEYS: [&str; 2] = ["RefreshStatus", "WaitTimeInSec"];

impl CheckRefreshRequest {
    fn echo(&self) -> Self {
        let mut echoed = self.clone();
        for key in REFRESH_OUTPUT_KEYS {
            echoed.passthrough.remove(key);
        }
        echoed
    }
}

/// Output of the refresh step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshOutcome {
    #[serde(flatten)]
    pub request: CheckRefreshRequest,
    pub refresh_status: RefreshStatus,
}

impl RefreshOutcome {
    pub fn new(request: &CheckRefreshRequest, refresh_status: RefreshStatus) -> Self {
        Self {
            request: request.echo(),
            refresh_status,
        }
    }
}

/// Output of the verify step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaitOutcome {
    #[serde(flatten)]
    pub request: CheckRefreshRequest,
    pub refresh_status: RefreshStatus,
    pub wait_time_in_sec: u64,
}

impl WaitOutcome {
    pub fn new(
        request: &CheckRefreshRequest,
        refresh_status: RefreshStatus,
        wait_time_in_sec: u64,
    ) -> Self {
        Self {
            request: request.echo(),
            refresh_status,
            wait_time_in_sec,
        }
    }
}

/// Receipt for a started workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReceipt {
    pub status_code: u16,
    pub body: String,
}

impl ExecutionReceipt {
    /// Receipt whose body is a one-key JSON object naming the execution ARN.
    pub fn keyed(status_code: u16, key: &str, execution_arn: &str) -> Self {
        let mut body = Map::new();
        body.insert(key.to_string(), Value::String(execution_arn.to_string()));
        Self {
            status_code,
            body: Value::Object(body).to_string(),
        }
    }

    /// Receipt whose body is the bare execution ARN.
    pub fn bare(status_code: u16, execution_arn: &str) -> Self {
        Self {
            status_code,
            body: execution_arn.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;

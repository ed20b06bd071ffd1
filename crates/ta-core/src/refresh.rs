//! Check refresh status and the wait-time policy.
//!
//! The workflow engine drives a check through
//! `Requested -> RefreshTriggered -> Polling -> Refreshable | Waiting`, one
//! transition per invocation. This module holds the pure part: turning a
//! reported refresh status into how long the workflow should sleep.

use crate::ids::CheckId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest wait the workflow is asked to honour.
pub const MAX_WAIT_SECONDS: u64 = 3600;

/// Reported cooldowns above this are not waited for.
pub const MAX_WAIT_MILLIS: u64 = MAX_WAIT_SECONDS * 1000;

/// Refresh status reported by Trusted Advisor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefreshStatus {
    None,
    Enqueued,
    Processing,
    Success,
    Abandoned,
    /// Any status string the API adds later, kept verbatim
    Other(String),
}

impl RefreshStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "none" => RefreshStatus::None,
            "enqueued" => RefreshStatus::Enqueued,
            "processing" => RefreshStatus::Processing,
            "success" => RefreshStatus::Success,
            "abandoned" => RefreshStatus::Abandoned,
            other => RefreshStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RefreshStatus::None => "none",
            RefreshStatus::Enqueued => "enqueued",
            RefreshStatus::Processing => "processing",
            RefreshStatus::Success => "success",
            RefreshStatus::Abandoned => "abandoned",
            RefreshStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RefreshStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RefreshStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RefreshStatus::parse(&raw))
    }
}

/// Result of `DescribeTrustedAdvisorCheckRefreshStatuses` for one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRefreshStatus {
    pub check_id: CheckId,
    pub status: RefreshStatus,
    pub millis_until_next_refreshable: u64,
}

/// Where a polled check stands after applying the wait policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    /// Nothing to wait for; the workflow proceeds
    Refreshable,
    /// The workflow sleeps `wait_time_in_seconds` and polls again
    Waiting,
}

/// How long the workflow should wait before the check is refreshable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitDecision {
    pub status: RefreshStatus,
    /// Always within `0..=MAX_WAIT_SECONDS`
    pub wait_time_in_seconds: u64,
    /// True when the reported cooldown exceeded the cap and was dropped
    pub capped: bool,
}

impl WaitDecision {
    /// Apply the cap: cooldowns up to one hour are rounded to whole seconds,
    /// anything longer becomes zero so the pipeline proceeds instead of
    /// sleeping for an unbounded time.
    pub fn from_status(status: &CheckRefreshStatus) -> Self {
        let millis = status.millis_until_next_refreshable;
        if millis <= MAX_WAIT_MILLIS {
            Self {
                status: status.status.clone(),
                wait_time_in_seconds: round_millis_to_seconds(millis),
                capped: false,
            }
        } else {
            Self {
                status: status.status.clone(),
                wait_time_in_seconds: 0,
                capped: true,
            }
        }
    }

    pub fn phase(&self) -> RefreshPhase {
        if self.wait_time_in_seconds == 0 {
            RefreshPhase::Refreshable
        } else {
            RefreshPhase::Waiting
        }
    }
}

/// Round milliseconds to the nearest second, ties to even.
pub fn round_millis_to_seconds(millis: u64) -> u64 {
    let seconds = millis / 1000;
    let remainder = millis % 1000;
    if remainder > 500 || (remainder == 500 && seconds % 2 == 1) {
        seconds + 1
    } else {
        seconds
    }
}

#[cfg(test)]
#[path = "refresh_test.rs"]
mod tests;

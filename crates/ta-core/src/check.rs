//! Trusted Advisor check descriptions and results.
//!
//! These mirror the parts of the Support API responses the pipeline reads.
//! Adapters in `ta-aws` convert SDK output into these types so reshaping code
//! never depends on SDK structs.

use crate::ids::CheckId;
use serde::{Deserialize, Serialize};

/// A check as returned by `DescribeTrustedAdvisorChecks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDescription {
    pub id: CheckId,
    pub name: String,
    pub category: String,
}

/// Resource counters of a check result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesSummary {
    pub processed: i64,
    pub flagged: i64,
    pub ignored: i64,
    pub suppressed: i64,
}

/// Savings estimate attached to cost optimizing checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostOptimizingSummary {
    pub estimated_monthly_savings: f64,
    pub estimated_percent_monthly_savings: f64,
}

/// One resource reported by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedResource {
    /// `ok`, `warning` or `error`
    pub status: String,
    pub region: Option<String>,
    pub resource_id: String,
    pub is_suppressed: bool,
    /// Positional values whose meaning depends on the check
    pub metadata: Vec<Option<String>>,
}

impl FlaggedResource {
    /// Only warning and error resources end up in the details report.
    pub fn is_reportable(&self) -> bool {
        self.status == "warning" || self.status == "error"
    }
}

/// Result of `DescribeTrustedAdvisorCheckResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: CheckId,
    pub status: String,
    pub resources_summary: ResourcesSummary,
    pub cost_optimizing: Option<CostOptimizingSummary>,
    pub flagged_resources: Vec<FlaggedResource>,
}

//! Reshape a Trusted Advisor check result into flat CSV tables.

use crate::check::{CheckResult, FlaggedResource};
use crate::config::CheckLayout;
use crate::error::{CoreError, CoreResult};
use crate::event::CheckRecord;
use crate::ids::CheckId;
use serde::Serialize;

/// Columns every report starts with.
pub const LEADING_COLUMNS: [&str; 3] = ["Date", "DateTime", "CheckName"];

/// Columns every report ends with.
pub const TRAILING_COLUMNS: [&str; 3] = ["AccountId", "AccountName", "AccountEmail"];

/// Header plus data rows, ready to be written as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Tables without data rows are never written.
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Wrap per-check columns with the leading and trailing fixed columns.
pub fn framed_header(columns: &[String]) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().cloned())
        .chain(TRAILING_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

fn framed_row(record: &CheckRecord, values: Vec<String>) -> Vec<String> {
    let account = &record.account;
    let mut row = Vec::with_capacity(values.len() + 6);
    row.push(account.date.clone());
    row.push(account.date_time.clone());
    row.push(record.check_name.clone());
    row.extend(values);
    row.push(account.account_id.to_string());
    row.push(account.account_name.clone());
    row.push(account.account_email.clone());
    row
}

/// Build the one-row summary table for a check result.
pub fn summary_table(
    record: &CheckRecord,
    summary_header: &[String],
    result: &CheckResult,
) -> CsvTable {
    let counts = result.resources_summary;
    let mut values = vec![
        result.check_id.to_string(),
        result.status.clone(),
        counts.processed.to_string(),
        counts.flagged.to_string(),
        counts.ignored.to_string(),
        counts.suppressed.to_string(),
    ];
    match result.cost_optimizing {
        Some(savings) => {
            values.push(savings.estimated_monthly_savings.to_string());
            values.push(savings.estimated_percent_monthly_savings.to_string());
        }
        None => {
            values.push("0".to_string());
            values.push("0".to_string());
        }
    }

    let mut table = CsvTable::new(framed_header(summary_header));
    table.rows.push(framed_row(record, values));
    table
}

/// Build the flagged-resources table using the check's header and schema.
///
/// Each schema entry is either a metadata position (all digits) or the name
/// of a resource field. Only `warning` and `error` resources are included.
pub fn details_table(
    record: &CheckRecord,
    layout: &CheckLayout,
    result: &CheckResult,
) -> CoreResult<CsvTable> {
    let mut table = CsvTable::new(framed_header(&layout.header));
    for resource in result.flagged_resources.iter().filter(|r| r.is_reportable()) {
        let values = layout
            .schema
            .iter()
            .map(|entry| resolve_schema_entry(&result.check_id, resource, entry))
            .collect::<CoreResult<Vec<_>>>()?;
        table.rows.push(framed_row(record, values));
    }
    Ok(table)
}

fn resolve_schema_entry(
    check_id: &CheckId,
    resource: &FlaggedResource,
    entry: &str,
) -> CoreResult<String> {
    if !entry.is_empty() && entry.bytes().all(|b| b.is_ascii_digit()) {
        let index: usize = entry.parse().map_err(|_| CoreError::InvalidConfig {
            key: format!("Schema_{}", check_id),
            message: format!("metadata index '{}' is too large", entry),
        })?;
        let value = resource.metadata.get(index).ok_or_else(|| {
            CoreError::SchemaIndexOutOfRange {
                check_id: check_id.to_string(),
                index,
                len: resource.metadata.len(),
            }
        })?;
        // Thousands separators would otherwise split CSV cells downstream.
        return Ok(value
            .as_deref()
            .map(|v| v.replace(',', ""))
            .unwrap_or_default());
    }

    match entry {
        "status" => Ok(resource.status.clone()),
        "region" => Ok(resource.region.clone().unwrap_or_default()),
        "resourceId" => Ok(resource.resource_id.clone()),
        "isSuppressed" => Ok(resource.is_suppressed.to_string()),
        other => Err(CoreError::UnknownResourceField {
            check_id: check_id.to_string(),
            field: other.to_string(),
        }),
    }
}

/// Name and size of the uploaded summary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryFile {
    #[serde(rename = "SummaryFileName")]
    pub name: String,
    #[serde(rename = "SummaryFileSize")]
    pub size: u64,
}

/// Name and size of the uploaded details file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsFile {
    #[serde(rename = "DetailsFileName")]
    pub name: String,
    #[serde(rename = "DetailsFileSize")]
    pub size: u64,
}

/// What one extraction produced. Sizes stay zero for files not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractReport {
    pub status: u16,
    pub check_id: CheckId,
    pub file_details: (SummaryFile, DetailsFile),
}

/// Output of the extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractOutcome {
    Extracted(ExtractReport),
    /// The check has no header/schema configured
    Skipped(String),
}

impl ExtractOutcome {
    pub fn skipped(check_id: &CheckId) -> Self {
        ExtractOutcome::Skipped(format!(
            "Header_{} not found in env variables; Skipping Check",
            check_id
        ))
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

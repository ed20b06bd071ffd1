use super::*;
use crate::check::{CostOptimizingSummary, ResourcesSummary};
use crate::event::{AccountRecord, RunStamp};
use crate::ids::AccountId;
use chrono::{TimeZone, Utc};

fn record() -> CheckRecord {
    let stamp = RunStamp::at(Utc.with_ymd_and_hms(2024, 5, 7, 9, 3, 4).unwrap());
    CheckRecord {
        check_id: CheckId::try_new("Qch7DwouX1").unwrap(),
        check_name: "Low Utilization Amazon EC2 Instances".to_string(),
        category: "cost_optimizing".to_string(),
        language: "en".to_string(),
        account: AccountRecord::new(
            AccountId::try_new("123456789012").unwrap(),
            "Production",
            "ops@example.com",
            &stamp,
        ),
    }
}

fn resource(status: &str, metadata: &[Option<&str>]) -> FlaggedResource {
    FlaggedResource {
        status: status.to_string(),
        region: Some("us-east-1".to_string()),
        resource_id: "abc123".to_string(),
        is_suppressed: false,
        metadata: metadata.iter().map(|m| m.map(String::from)).collect(),
    }
}

fn result(flagged: Vec<FlaggedResource>, savings: Option<CostOptimizingSummary>) -> CheckResult {
    CheckResult {
        check_id: CheckId::try_new("Qch7DwouX1").unwrap(),
        status: "warning".to_string(),
        resources_summary: ResourcesSummary {
            processed: 10,
            flagged: 2,
            ignored: 0,
            suppressed: 1,
        },
        cost_optimizing: savings,
        flagged_resources: flagged,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_framed_header() {
    let header = framed_header(&strings(&["Region", "Instance ID"]));
    assert_eq!(
        header,
        strings(&[
            "Date",
            "DateTime",
            "CheckName",
            "Region",
            "Instance ID",
            "AccountId",
            "AccountName",
            "AccountEmail"
        ])
    );
}

#[test]
fn test_summary_with_savings() {
    let savings = CostOptimizingSummary {
        estimated_monthly_savings: 123.45,
        estimated_percent_monthly_savings: 12.5,
    };
    let table = summary_table(&record(), &strings(&["CheckId", "Status"]), &result(vec![], Some(savings)));
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(
        row,
        &strings(&[
            "05-07-2024",
            "2024-05-07 09:03:04",
            "Low Utilization Amazon EC2 Instances",
            "Qch7DwouX1",
            "warning",
            "10",
            "2",
            "0",
            "1",
            "123.45",
            "12.5",
            "123456789012",
            "Production",
            "ops@example.com"
        ])
    );
}

#[test]
fn test_summary_without_savings_uses_zeros() {
    let table = summary_table(&record(), &[], &result(vec![], None));
    let row = &table.rows[0];
    assert_eq!(row[9], "0");
    assert_eq!(row[10], "0");
}

#[test]
fn test_details_only_warning_and_error() {
    let layout = CheckLayout {
        header: strings(&["Region", "Instance ID", "Status"]),
        schema: strings(&["0", "1", "status"]),
    };
    let flagged = vec![
        resource("warning", &[Some("us-east-1"), Some("i-1")]),
        resource("ok", &[Some("us-east-1"), Some("i-2")]),
        resource("error", &[Some("eu-west-1"), Some("i-3")]),
    ];
    let table = details_table(&record(), &layout, &result(flagged, None)).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][3..6], strings(&["us-east-1", "i-1", "warning"])[..]);
    assert_eq!(table.rows[1][4], "i-3");
}

#[test]
fn test_details_strips_commas_and_blanks_missing() {
    let layout = CheckLayout {
        header: strings(&["Savings", "Note"]),
        schema: strings(&["0", "1"]),
    };
    let flagged = vec![resource("warning", &[Some("$1,234.00"), None])];
    let table = details_table(&record(), &layout, &result(flagged, None)).unwrap();
    assert_eq!(table.rows[0][3], "$1234.00");
    assert_eq!(table.rows[0][4], "");
}

#[test]
fn test_details_named_fields() {
    let layout = CheckLayout {
        header: strings(&["Region", "Resource", "Suppressed"]),
        schema: strings(&["region", "resourceId", "isSuppressed"]),
    };
    let flagged = vec![resource("error", &[])];
    let table = details_table(&record(), &layout, &result(flagged, None)).unwrap();
    assert_eq!(table.rows[0][3..6], strings(&["us-east-1", "abc123", "false"])[..]);
}

#[test]
fn test_details_index_out_of_range() {
    let layout = CheckLayout {
        header: strings(&["Missing"]),
        schema: strings(&["5"]),
    };
    let flagged = vec![resource("warning", &[Some("a")])];
    let err = details_table(&record(), &layout, &result(flagged, None)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::SchemaIndexOutOfRange { index: 5, len: 1, .. }
    ));
}

#[test]
fn test_details_unknown_field() {
    let layout = CheckLayout {
        header: strings(&["Mystery"]),
        schema: strings(&["mystery"]),
    };
    let flagged = vec![resource("warning", &[])];
    let err = details_table(&record(), &layout, &result(flagged, None)).unwrap_err();
    assert!(matches!(err, CoreError::UnknownResourceField { .. }));
}

#[test]
fn test_details_no_reportable_resources() {
    let layout = CheckLayout {
        header: strings(&["Region"]),
        schema: strings(&["0"]),
    };
    let flagged = vec![resource("ok", &[Some("us-east-1")])];
    let table = details_table(&record(), &layout, &result(flagged, None)).unwrap();
    assert!(!table.has_rows());
}

#[test]
fn test_extract_outcome_wire_format() {
    let outcome = ExtractOutcome::Extracted(ExtractReport {
        status: 200,
        check_id: CheckId::try_new("Qch7DwouX1").unwrap(),
        file_details: (
            SummaryFile {
                name: "s.csv".to_string(),
                size: 10,
            },
            DetailsFile {
                name: "d.csv".to_string(),
                size: 0,
            },
        ),
    });
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["checkId"], "Qch7DwouX1");
    assert_eq!(value["fileDetails"][0]["SummaryFileName"], "s.csv");
    assert_eq!(value["fileDetails"][1]["DetailsFileSize"], 0);

    let skipped = serde_json::to_value(ExtractOutcome::skipped(&CheckId::try_new("x1").unwrap())).unwrap();
    assert_eq!(skipped, "Header_x1 not found in env variables; Skipping Check");
}

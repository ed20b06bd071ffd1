//! Report and tag extraction handler tests

mod common;

use common::{account, Harness};
use serde_json::json;
use ta_aws::fakes::{FakeRoleAssumer, FakeTagging, FakeTrustedAdvisor};
use ta_core::{
    CheckId, CheckRecord, CheckResult, CostOptimizingSummary, FlaggedResource, ResourcesSummary,
    TagTaskRecord,
};
use ta_lambda::{dispatch, HandlerName, PipelineError};

const BUCKET: &str = "ta-explorer-data";

fn extract_env(with_layout: bool) -> Vec<(&'static str, &'static str)> {
    let mut env = vec![
        ("IAMRoleName", "TAExplorerRole"),
        ("S3BucketName", BUCKET),
        (
            "Header_Summary",
            "CheckId,Status,ResourcesProcessed,ResourcesFlagged,ResourcesIgnored,ResourcesSuppressed,EstimatedMonthlySavings,EstimatedPercentMonthlySavings",
        ),
    ];
    if with_layout {
        env.push(("Header_Qch7DwouX1", "Region,Instance ID,Estimated Monthly Savings,Status"));
        env.push(("Schema_Qch7DwouX1", "0,1,4,status"));
    }
    env
}

fn record() -> CheckRecord {
    CheckRecord {
        check_id: CheckId::try_new("Qch7DwouX1").unwrap(),
        check_name: "Low Utilization Amazon EC2 Instances".to_string(),
        category: "cost_optimizing".to_string(),
        language: "en".to_string(),
        account: account("123456789012"),
    }
}

fn flagged(status: &str, instance: &str, savings: &str) -> FlaggedResource {
    FlaggedResource {
        status: status.to_string(),
        region: Some("us-east-1".to_string()),
        resource_id: format!("res-{}", instance),
        is_suppressed: false,
        metadata: vec![
            Some("us-east-1".to_string()),
            Some(instance.to_string()),
            Some("m5.large".to_string()),
            None,
            Some(savings.to_string()),
        ],
    }
}

fn result(flagged_resources: Vec<FlaggedResource>) -> CheckResult {
    CheckResult {
        check_id: CheckId::try_new("Qch7DwouX1").unwrap(),
        status: "warning".to_string(),
        resources_summary: ResourcesSummary {
            processed: 12,
            flagged: 2,
            ignored: 0,
            suppressed: 1,
        },
        cost_optimizing: Some(CostOptimizingSummary {
            estimated_monthly_savings: 1234.5,
            estimated_percent_monthly_savings: 0.25,
        }),
        flagged_resources,
    }
}

#[tokio::test]
async fn test_extract_ta_data_lands_summary_and_details() {
    let harness = Harness::new(&extract_env(true)).with_member_advisor(
        FakeTrustedAdvisor::new().with_result(result(vec![
            flagged("warning", "i-0aaa", "$1,234.50"),
            flagged("ok", "i-0bbb", "$0.00"),
            flagged("error", "i-0ccc", "$10.00"),
        ])),
    );
    let event = serde_json::to_value(record()).unwrap();

    let output = dispatch(HandlerName::ExtractTaData, &harness.context(), event)
        .await
        .unwrap();

    assert_eq!(output["status"], 200);
    assert_eq!(output["checkId"], "Qch7DwouX1");
    let summary_name = "Qch7DwouX1_123456789012_Summary_03-09-2024_14-05-06.csv";
    let details_name = "Qch7DwouX1_123456789012_03-09-2024_14-05-06.csv";
    assert_eq!(output["fileDetails"][0]["SummaryFileName"], summary_name);
    assert_eq!(output["fileDetails"][1]["DetailsFileName"], details_name);

    let summary_key = format!("TA-Reports/cost_optimizing/Summary/2024/3/9/{}", summary_name);
    let details_key = format!(
        "TA-Reports/cost_optimizing/check_Qch7DwouX1/2024/3/9/{}",
        details_name
    );
    assert_eq!(harness.objects.keys(BUCKET), {
        let mut keys = vec![summary_key.clone(), details_key.clone()];
        keys.sort();
        keys
    });

    let summary = String::from_utf8(harness.objects.object(BUCKET, &summary_key).unwrap()).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,DateTime,CheckName,CheckId,Status,ResourcesProcessed,ResourcesFlagged,ResourcesIgnored,ResourcesSuppressed,EstimatedMonthlySavings,EstimatedPercentMonthlySavings,AccountId,AccountName,AccountEmail"
    );
    assert_eq!(
        lines.next().unwrap(),
        "03-09-2024,2024-03-09 14:05:06,Low Utilization Amazon EC2 Instances,Qch7DwouX1,warning,12,2,0,1,1234.5,0.25,123456789012,Production,ops@example.com"
    );
    assert_eq!(
        output["fileDetails"][0]["SummaryFileSize"],
        summary.len() as u64
    );

    let details = String::from_utf8(harness.objects.object(BUCKET, &details_key).unwrap()).unwrap();
    let rows: Vec<&str> = details.lines().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        "Date,DateTime,CheckName,Region,Instance ID,Estimated Monthly Savings,Status,AccountId,AccountName,AccountEmail"
    );
    assert!(rows[1].contains(",us-east-1,i-0aaa,$1234.50,warning,"));
    assert!(rows[2].contains(",i-0ccc,$10.00,error,"));
}

#[tokio::test]
async fn test_extract_ta_data_skips_details_without_reportable_resources() {
    let harness = Harness::new(&extract_env(true)).with_member_advisor(
        FakeTrustedAdvisor::new().with_result(result(vec![flagged("ok", "i-0bbb", "$0.00")])),
    );
    let event = serde_json::to_value(record()).unwrap();

    let output = dispatch(HandlerName::ExtractTaData, &harness.context(), event)
        .await
        .unwrap();

    assert_eq!(output["fileDetails"][1]["DetailsFileSize"], 0);
    assert_eq!(harness.objects.keys(BUCKET).len(), 1);
}

#[tokio::test]
async fn test_extract_ta_data_lands_rows_when_header_and_schema_lengths_differ() {
    let mut env = extract_env(false);
    env.push(("Header_Qch7DwouX1", "Region,Instance"));
    env.push(("Schema_Qch7DwouX1", "region,0,1"));
    let harness = Harness::new(&env).with_member_advisor(
        FakeTrustedAdvisor::new().with_result(result(vec![flagged("warning", "i-0aaa", "$1.00")])),
    );
    let event = serde_json::to_value(record()).unwrap();

    let output = dispatch(HandlerName::ExtractTaData, &harness.context(), event)
        .await
        .unwrap();

    let details_name = "Qch7DwouX1_123456789012_03-09-2024_14-05-06.csv";
    let details_key = format!(
        "TA-Reports/cost_optimizing/check_Qch7DwouX1/2024/3/9/{}",
        details_name
    );
    let details = String::from_utf8(harness.objects.object(BUCKET, &details_key).unwrap()).unwrap();
    let rows: Vec<&str> = details.lines().collect();
    assert_eq!(
        rows[0],
        "Date,DateTime,CheckName,Region,Instance,AccountId,AccountName,AccountEmail"
    );
    assert!(rows[1].contains(",us-east-1,us-east-1,i-0aaa,123456789012,"));
    assert_eq!(output["fileDetails"][1]["DetailsFileSize"], details.len() as u64);
}

#[tokio::test]
async fn test_extract_ta_data_without_layout_skips_check() {
    let harness = Harness::new(&extract_env(false))
        .with_roles(FakeRoleAssumer::new().deny("123456789012"));
    let event = serde_json::to_value(record()).unwrap();

    let output = dispatch(HandlerName::ExtractTaData, &harness.context(), event)
        .await
        .unwrap();

    assert_eq!(
        output,
        json!("Header_Qch7DwouX1 not found in env variables; Skipping Check")
    );
    assert!(harness.roles.assumed().is_empty());
    assert!(harness.objects.keys(BUCKET).is_empty());
}

#[tokio::test]
async fn test_extract_ta_data_rejects_out_of_range_schema() {
    let mut env = extract_env(false);
    env.push(("Header_Qch7DwouX1", "Region,Missing"));
    env.push(("Schema_Qch7DwouX1", "0,9"));
    let harness = Harness::new(&env).with_member_advisor(
        FakeTrustedAdvisor::new().with_result(result(vec![flagged("warning", "i-0aaa", "$1.00")])),
    );
    let event = serde_json::to_value(record()).unwrap();

    let err = dispatch(HandlerName::ExtractTaData, &harness.context(), event)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Unknown(_)));
    assert!(err.to_string().contains("out of range"));
    assert!(harness.objects.keys(BUCKET).is_empty());
}

fn task(resource_type: &str, region: &str) -> TagTaskRecord {
    TagTaskRecord {
        resource_type: resource_type.to_string(),
        region: region.to_string(),
        account: account("123456789012"),
    }
}

#[tokio::test]
async fn test_extract_tag_data_merges_keys_per_resource() {
    let harness = Harness::new(&[
        ("IAMRoleName", "TAExplorerRole"),
        ("S3BucketName", BUCKET),
        ("CustomerKeys", "CostCenter, Owner"),
    ])
    .with_tagging(
        FakeTagging::new()
            .with_resource(
                "ec2:instance",
                "arn:aws:ec2:eu-west-1:123456789012:instance/i-0aaa",
                &[("Owner", "alice"), ("CostCenter", "42")],
            )
            .with_resource(
                "ec2:instance",
                "arn:aws:ec2:eu-west-1:123456789012:instance/i-0bbb",
                &[("Owner", "bob")],
            )
            .with_resource(
                "ec2:instance",
                "arn:aws:ec2:eu-west-1:123456789012:instance/i-0ccc",
                &[("Name", "untracked")],
            ),
    );
    let event = serde_json::to_value(task("ec2:instance", "eu-west-1")).unwrap();

    let output = dispatch(HandlerName::ExtractTagData, &harness.context(), event)
        .await
        .unwrap();

    let file_name = "ec2:instance_123456789012_eu-west-1_03-09-2024_14-05-06.csv";
    assert_eq!(output["FileName"], file_name);
    assert_eq!(output["ResourceCount"], 2);
    assert_eq!(harness.members.tagging_regions(), vec!["eu-west-1"]);

    let key = format!("Tags/ec2:instance/2024/3/9/{}", file_name);
    let body = String::from_utf8(harness.objects.object(BUCKET, &key).unwrap()).unwrap();
    let rows: Vec<&str> = body.lines().collect();
    assert_eq!(
        rows,
        vec![
            "Date,DateTime,AccountId,AccountName,AccountEmail,RegionName,ResourceType,ResourceArn,ResourceId,CostCenter,Owner",
            "03-09-2024,2024-03-09 14:05:06,123456789012,Production,ops@example.com,eu-west-1,ec2:instance,arn:aws:ec2:eu-west-1:123456789012:instance/i-0aaa,i-0aaa,42,alice",
            "03-09-2024,2024-03-09 14:05:06,123456789012,Production,ops@example.com,eu-west-1,ec2:instance,arn:aws:ec2:eu-west-1:123456789012:instance/i-0bbb,i-0bbb,,bob",
        ]
    );
}

#[tokio::test]
async fn test_extract_tag_data_without_keys_is_a_no_op() {
    let harness = Harness::new(&[("CustomerKeys", " ")])
        .with_roles(FakeRoleAssumer::new().deny("123456789012"));
    let event = serde_json::to_value(task("ec2:instance", "eu-west-1")).unwrap();

    let output = dispatch(HandlerName::ExtractTagData, &harness.context(), event)
        .await
        .unwrap();

    assert!(output.is_null());
    assert!(harness.roles.assumed().is_empty());
}

#[tokio::test]
async fn test_extract_tag_data_writes_nothing_without_matches() {
    let harness = Harness::new(&[
        ("IAMRoleName", "TAExplorerRole"),
        ("S3BucketName", BUCKET),
        ("CustomerKeys", "CostCenter"),
    ]);
    let event = serde_json::to_value(task("rds:db", "us-east-1")).unwrap();

    let output = dispatch(HandlerName::ExtractTagData, &harness.context(), event)
        .await
        .unwrap();

    assert!(output.is_null());
    assert!(harness.objects.keys(BUCKET).is_empty());
}

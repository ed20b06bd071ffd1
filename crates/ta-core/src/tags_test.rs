use super::*;
use crate::event::{AccountRecord, RunStamp};
use crate::ids::AccountId;
use chrono::{TimeZone, Utc};

fn task() -> TagTaskRecord {
    let stamp = RunStamp::at(Utc.with_ymd_and_hms(2024, 5, 7, 9, 3, 4).unwrap());
    TagTaskRecord {
        resource_type: "ec2:instance".to_string(),
        region: "us-west-2".to_string(),
        account: AccountRecord::new(
            AccountId::try_new("123456789012").unwrap(),
            "Production",
            "ops@example.com",
            &stamp,
        ),
    }
}

fn tagged(arn: &str, tags: &[(&str, &str)]) -> TaggedResource {
    TaggedResource {
        arn: arn.to_string(),
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn test_resource_id_from_arn() {
    assert_eq!(
        resource_id_from_arn("arn:aws:ec2:us-east-1:123456789012:instance/i-0abc"),
        "i-0abc"
    );
    assert_eq!(
        resource_id_from_arn("arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/web/50dc6c495c0c9188"),
        "50dc6c495c0c9188"
    );
    assert_eq!(
        resource_id_from_arn("arn:aws:rds:us-east-1:123456789012:db:orders"),
        "orders"
    );
    assert_eq!(resource_id_from_arn("no-separators"), "");
}

#[test]
fn test_merges_keys_per_arn_in_first_seen_order() {
    let keys = vec!["CostCenter".to_string(), "Owner".to_string()];
    let mut collector = TagCollector::new(keys);
    collector.add(
        "CostCenter",
        &[
            tagged("arn:aws:ec2:r:1:instance/i-2", &[("CostCenter", "42"), ("Owner", "bob")]),
            tagged("arn:aws:ec2:r:1:instance/i-1", &[("CostCenter", "7")]),
        ],
    );
    collector.add(
        "Owner",
        &[
            tagged("arn:aws:ec2:r:1:instance/i-3", &[("Owner", "eve")]),
            tagged("arn:aws:ec2:r:1:instance/i-2", &[("CostCenter", "42"), ("Owner", "bob")]),
        ],
    );
    assert_eq!(collector.len(), 3);

    let table = collector.into_table(&task());
    assert_eq!(table.header.len(), 11);
    assert_eq!(table.header[9], "CostCenter");
    assert_eq!(table.header[10], "Owner");

    let ids: Vec<&str> = table.rows.iter().map(|r| r[8].as_str()).collect();
    assert_eq!(ids, vec!["i-2", "i-1", "i-3"]);
    assert_eq!(table.rows[0][9..], ["42".to_string(), "bob".to_string()]);
    assert_eq!(table.rows[1][9..], ["7".to_string(), String::new()]);
    assert_eq!(table.rows[2][9..], [String::new(), "eve".to_string()]);
}

#[test]
fn test_row_carries_task_context() {
    let mut collector = TagCollector::new(vec!["CostCenter".to_string()]);
    collector.add("CostCenter", &[tagged("arn:aws:ec2:r:1:instance/i-9", &[("CostCenter", "1")])]);
    let table = collector.into_table(&task());
    let row = &table.rows[0];
    assert_eq!(row[0], "05-07-2024");
    assert_eq!(row[2], "123456789012");
    assert_eq!(row[5], "us-west-2");
    assert_eq!(row[6], "ec2:instance");
    assert_eq!(row[7], "arn:aws:ec2:r:1:instance/i-9");
}

#[test]
fn test_resources_without_the_key_are_ignored() {
    let mut collector = TagCollector::new(vec!["CostCenter".to_string()]);
    collector.add("CostCenter", &[tagged("arn:x/i-1", &[("Name", "web")])]);
    assert!(collector.is_empty());
}

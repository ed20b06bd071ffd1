use super::*;
use crate::catalog::view_catalog;

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_include_tags_rule() {
    assert!(include_tags(&tags(&["CostCenter"]), true));
    assert!(!include_tags(&tags(&["CostCenter"]), false));
    assert!(!include_tags(&[], true));
    assert!(!include_tags(&[], false));
}

#[test]
fn test_no_tags_means_no_join() {
    for present in [true, false] {
        let views = generate_views(&view_catalog(), &[], present);
        assert_eq!(views.len(), 10);
        for view in &views {
            assert!(!view.sql.contains("LEFT JOIN"), "{}", view.sql);
            assert!(!view.sql.contains("\"tags\"."), "{}", view.sql);
        }
    }
}

#[test]
fn test_missing_tags_table_means_no_join() {
    let views = generate_views(&view_catalog(), &tags(&["CostCenter"]), false);
    assert!(views.iter().all(|v| !v.sql.contains("LEFT JOIN")));
}

#[test]
fn test_single_tag_joins_taggable_views() {
    let views = generate_views(&view_catalog(), &tags(&["CostCenter"]), true);
    let ec2 = views.iter().find(|v| v.check_id == "qch7dwoux1").unwrap();
    assert_eq!(ec2.sql.matches("\"tags\".\"CostCenter\"").count(), 1);
    assert!(ec2.sql.contains(
        "ON ((\"check_qch7dwoux1\".\"instance id\" = \"tags\".\"resourceid\") AND \
         (\"check_qch7dwoux1\".\"datetime\" = \"tags\".\"datetime\"))"
    ));

    let joined: Vec<&str> = views
        .iter()
        .filter(|v| v.sql.contains("LEFT JOIN"))
        .map(|v| v.check_id.as_str())
        .collect();
    assert_eq!(joined.len(), 6);
    assert!(!joined.contains(&"summary"));
    assert!(!joined.contains(&"1e93e4c0b5"));
}

#[test]
fn test_tag_columns_follow_configured_order() {
    let views = generate_views(&view_catalog(), &tags(&["Owner", "CostCenter"]), true);
    let ebs = views.iter().find(|v| v.check_id == "davu99dc4c").unwrap();
    let owner = ebs.sql.find("\"tags\".\"Owner\"").unwrap();
    let cost = ebs.sql.find("\"tags\".\"CostCenter\"").unwrap();
    assert!(owner < cost);
}

#[test]
fn test_generated_view_metadata() {
    let views = generate_views(&view_catalog(), &[], false);
    let summary = views.iter().find(|v| v.check_id == "summary").unwrap();
    assert_eq!(summary.query_id, "Query_summary");
    assert_eq!(summary.view_name, "summary_view");
    assert!(summary.sql.starts_with("CREATE OR REPLACE VIEW \"summary_view\" AS SELECT"));
}

#[test]
fn test_generated_view_serializes_camel_case() {
    let views = generate_views(&view_catalog(), &[], false);
    let json = serde_json::to_value(&views[0]).unwrap();
    assert_eq!(json["checkId"], "1e93e4c0b5");
    assert_eq!(json["queryId"], "Query_1e93e4c0b5");
    assert_eq!(json["viewName"], "EC2ReservedInstanceLeaseExpiration_view");
}

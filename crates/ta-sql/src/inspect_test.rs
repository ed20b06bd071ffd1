use super::*;
use crate::catalog::view_catalog;
use crate::generator::{generate_views, view_statement};

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_every_catalog_view_parses() {
    for with_tags in [false, true] {
        let requested = if with_tags { tags(&["CostCenter"]) } else { Vec::new() };
        for view in generate_views(&view_catalog(), &requested, true) {
            let shape = inspect_view(&view.sql)
                .unwrap_or_else(|e| panic!("{} failed to parse: {}\n{}", view.check_id, e, view.sql));
            assert!(shape.base_table.ends_with(view.check_id.as_str()));
        }
    }
}

#[test]
fn test_round_trip_with_tag_join() {
    let catalog = view_catalog();
    let spec = catalog.iter().find(|v| v.check_id == "qch7dwoux1").unwrap();
    let statement = view_statement(spec, &tags(&["CostCenter", "Owner"]), true);

    let shape = inspect_view(&statement.to_sql()).unwrap();
    assert_eq!(shape.base_table, "check_qch7dwoux1");
    assert!(shape.has_tag_join);

    let mut expected = vec!["check_qch7dwoux1.*".to_string()];
    expected.extend(spec.columns.iter().map(|c| c.alias.clone()));
    expected.push("CostCenter".to_string());
    expected.push("Owner".to_string());
    assert_eq!(shape.columns, expected);
}

#[test]
fn test_round_trip_without_tag_join() {
    let catalog = view_catalog();
    let spec = catalog.iter().find(|v| v.check_id == "summary").unwrap();
    let statement = view_statement(spec, &tags(&["CostCenter"]), false);

    let shape = inspect_view(&statement.to_sql()).unwrap();
    assert_eq!(shape.base_table, "summary");
    assert!(!shape.has_tag_join);
    assert_eq!(
        shape.columns,
        vec!["summary.*", "date_time", "optimizationPercent", "trueoptimizationPercent"]
    );
}

#[test]
fn test_select_body_has_no_view_name() {
    let catalog = view_catalog();
    let spec = catalog.iter().find(|v| v.check_id == "z4aubrnsmz").unwrap();
    let statement = view_statement(spec, &[], false);
    let shape = inspect_view(&statement.select_sql()).unwrap();
    assert_eq!(shape.view_name, None);
    assert_eq!(shape.base_table, "check_z4aubrnsmz");
}

#[test]
fn test_rejects_non_view_statements() {
    let result = inspect_view("SELECT 1 UNION SELECT 2");
    assert!(matches!(result, Err(SqlError::UnsupportedStatement(_))));
}

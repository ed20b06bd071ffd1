use super::*;

fn statement(tag_join: Option<TagJoin>) -> ViewStatement {
    ViewStatement {
        view_name: "IdleLoadBalancers_view".to_string(),
        base_table: "check_hjlmh88um8".to_string(),
        columns: vec![SelectColumn::new(
            Expr::func(
                "date_parse",
                vec![
                    Expr::func(
                        "substr",
                        vec![
                            Expr::col("check_hjlmh88um8", "datetime"),
                            Expr::int(1),
                            Expr::int(19),
                        ],
                    ),
                    Expr::str("%Y-%m-%d %T"),
                ],
            ),
            "date_time",
        )],
        tag_join,
    }
}

#[test]
fn test_expr_rendering() {
    let expr = Expr::func(
        "rtrim",
        vec![Expr::func(
            "replace",
            vec![
                Expr::func("substr", vec![Expr::bare_col("current monthly cost"), Expr::int(2)]),
                Expr::str("$"),
            ],
        )],
    )
    .cast("decimal(18,2)");
    assert_eq!(
        expr.to_string(),
        "CAST(rtrim(replace(substr(\"current monthly cost\", 2), '$')) AS decimal(18,2))"
    );
}

#[test]
fn test_binary_is_parenthesized() {
    let expr = Expr::int(1).binary(
        BinaryOp::Sub,
        Expr::bare_col("a").binary(BinaryOp::Div, Expr::bare_col("b")),
    );
    assert_eq!(expr.to_string(), "(1 - (\"a\" / \"b\"))");
}

#[test]
fn test_view_without_tags() {
    let sql = statement(None).to_sql();
    assert_eq!(
        sql,
        "CREATE OR REPLACE VIEW \"IdleLoadBalancers_view\" AS SELECT \"check_hjlmh88um8\".*, \
         date_parse(substr(\"check_hjlmh88um8\".\"datetime\", 1, 19), '%Y-%m-%d %T') AS \"date_time\" \
         FROM \"check_hjlmh88um8\""
    );
    assert!(!sql.contains("LEFT JOIN"));
}

#[test]
fn test_view_with_tag_join() {
    let sql = statement(Some(TagJoin {
        resource_column: "load balancer name".to_string(),
        tags: vec!["CostCenter".to_string(), "Owner".to_string()],
    }))
    .select_sql();
    assert!(sql.ends_with(
        "AS \"date_time\", \"tags\".\"CostCenter\", \"tags\".\"Owner\" \
         FROM (\"check_hjlmh88um8\" LEFT JOIN \"tags\" ON \
         ((\"check_hjlmh88um8\".\"load balancer name\" = \"tags\".\"resourceid\") AND \
         (\"check_hjlmh88um8\".\"datetime\" = \"tags\".\"datetime\")))"
    ));
}

#[test]
fn test_hostile_tag_name_stays_quoted() {
    let sql = statement(Some(TagJoin {
        resource_column: "load balancer name".to_string(),
        tags: vec!["x\" FROM secrets --".to_string()],
    }))
    .select_sql();
    assert!(sql.contains("\"tags\".\"x\"\" FROM secrets --\""));
}

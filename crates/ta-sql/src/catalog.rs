//! The fixed catalog of Athena views over the landed check tables.

use crate::builder::{BinaryOp, Expr, SelectColumn, DATETIME_COLUMN};

/// Prefix of the table the crawler creates for each check.
pub const CHECK_TABLE_PREFIX: &str = "check_";

/// Table the crawler creates for the check summaries.
pub const SUMMARY_TABLE: &str = "summary";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %T";

/// Definition of one view, before tag columns are decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    /// Check id, or `summary` for the summary view.
    pub check_id: &'static str,
    pub view_name: &'static str,
    pub base_table: String,
    pub columns: Vec<SelectColumn>,
    /// Base-table column joined to the tags table. `None` for views that
    /// never carry tags.
    pub tag_resource_column: Option<&'static str>,
}

impl ViewSpec {
    fn check(
        check_id: &'static str,
        view_name: &'static str,
        tag_resource_column: Option<&'static str>,
        derive: impl FnOnce(&str) -> Vec<SelectColumn>,
    ) -> Self {
        let base_table = format!("{}{}", CHECK_TABLE_PREFIX, check_id);
        let mut columns = vec![date_time(&base_table)];
        columns.extend(derive(&base_table));
        Self {
            check_id,
            view_name,
            base_table,
            columns,
            tag_resource_column,
        }
    }

    /// Identifier used to partition the query output location.
    pub fn query_id(&self) -> String {
        format!("Query_{}", self.check_id)
    }

    pub fn is_taggable(&self) -> bool {
        self.tag_resource_column.is_some()
    }
}

/// `date_time`: the leading `YYYY-MM-DD HH:MM:SS` of `datetime` as a timestamp.
fn date_time(table: &str) -> SelectColumn {
    SelectColumn::new(
        parse_timestamp(Expr::col(table, DATETIME_COLUMN)),
        "date_time",
    )
}

fn parse_timestamp(text: Expr) -> Expr {
    Expr::func(
        "date_parse",
        vec![
            Expr::func("substr", vec![text, Expr::int(1), Expr::int(19)]),
            Expr::str(TIMESTAMP_FORMAT),
        ],
    )
}

/// `$12.34` style text: drop the leading symbol, any `$`, trailing blanks.
fn currency(table: &str, column: &str, data_type: &'static str) -> Expr {
    Expr::func(
        "rtrim",
        vec![Expr::func(
            "replace",
            vec![
                Expr::func("substr", vec![Expr::col(table, column), Expr::int(2)]),
                Expr::str("$"),
            ],
        )],
    )
    .cast(data_type)
}

/// Fixed-width numeric prefix such as `12.3%` or `0.41MB`.
fn numeric_prefix(table: &str, column: &str, width: i64) -> Expr {
    Expr::func(
        "substr",
        vec![Expr::col(table, column), Expr::int(1), Expr::int(width)],
    )
    .cast("decimal(10, 4)")
}

fn decimal(column: &str) -> Expr {
    Expr::bare_col(column).cast("decimal(10,2)")
}

/// `resourcesprocessed`, with zero replaced by one so the percentages never
/// divide by zero.
pub fn processed_denominator() -> Expr {
    Expr::func(
        "coalesce",
        vec![
            Expr::func("nullif", vec![decimal("resourcesprocessed"), Expr::int(0)]),
            Expr::int(1),
        ],
    )
}

/// `(1 - numerator / processed) * 100`. A check that processed nothing
/// reports 100, since the guarded denominator turns `0 / 0` into `0 / 1`.
fn percent_of_processed(numerator: Expr) -> Expr {
    Expr::int(1)
        .binary(
            BinaryOp::Sub,
            numerator.binary(BinaryOp::Div, processed_denominator()),
        )
        .binary(BinaryOp::Mul, Expr::int(100))
}

fn summary_view() -> ViewSpec {
    let flagged = decimal("resourcesflagged");
    let excluded = decimal("resourcesignored").binary(BinaryOp::Add, decimal("resourcessuppressed"));
    ViewSpec {
        check_id: "summary",
        view_name: "summary_view",
        base_table: SUMMARY_TABLE.to_string(),
        columns: vec![
            date_time(SUMMARY_TABLE),
            SelectColumn::new(percent_of_processed(flagged.clone()), "optimizationPercent"),
            SelectColumn::new(
                percent_of_processed(flagged.binary(BinaryOp::Sub, excluded)),
                "trueoptimizationPercent",
            ),
        ],
        tag_resource_column: None,
    }
}

/// Every view, in submission order.
pub fn view_catalog() -> Vec<ViewSpec> {
    vec![
        ViewSpec::check(
            "1e93e4c0b5",
            "EC2ReservedInstanceLeaseExpiration_view",
            None,
            |t| {
                vec![
                    SelectColumn::new(
                        currency(t, "current monthly cost", "decimal(18,2)"),
                        "current_monthly_cost",
                    ),
                    SelectColumn::new(
                        currency(t, "estimated monthly savings", "decimal(18,2)"),
                        "estimated_monthly_savings",
                    ),
                    SelectColumn::new(
                        parse_timestamp(Expr::func(
                            "replace",
                            vec![Expr::col(t, "expiration date"), Expr::str("T"), Expr::str(" ")],
                        )),
                        "expiration_date",
                    ),
                ]
            },
        ),
        ViewSpec::check(
            "51fc20e7i2",
            "Route53LatencyResourceRecordSets_view",
            Some("hosted zone name"),
            |_| Vec::new(),
        ),
        ViewSpec::check(
            "davu99dc4c",
            "UnderutilizedAmazonEBSVolumes_view",
            Some("volume id"),
            |t| {
                vec![SelectColumn::new(
                    currency(t, "monthly storage cost", "decimal(18,2)"),
                    "Monthly_Storage_Cost",
                )]
            },
        ),
        ViewSpec::check(
            "g31sq1e9u",
            "UnderutilizedAmazonRedshiftClusters_view",
            Some("cluster"),
            |_| Vec::new(),
        ),
        ViewSpec::check(
            "qch7dwoux1",
            "LowUtilizationAmazonEC2Instances_view",
            Some("instance id"),
            |t| {
                vec![
                    SelectColumn::new(
                        numeric_prefix(t, "14-day average cpu utilization", 3),
                        "average_cpu_utilization_14_days",
                    ),
                    SelectColumn::new(
                        numeric_prefix(t, "14-day average network i/o", 4),
                        "average_network_i/o_utilization_14 days",
                    ),
                    SelectColumn::new(
                        currency(t, "estimated monthly savings", "decimal(18,2)"),
                        "estimated_monthly_savings",
                    ),
                ]
            },
        ),
        ViewSpec::check(
            "ti39halfu8",
            "AmazonRDSIdleDBInstances_view",
            Some("db instance name"),
            |t| {
                // This column carries the symbol without a leading character.
                let savings = Expr::func(
                    "rtrim",
                    vec![Expr::func(
                        "replace",
                        vec![
                            Expr::func(
                                "replace",
                                vec![
                                    Expr::col(t, "estimated monthly savings ON demand"),
                                    Expr::str("$"),
                                ],
                            ),
                            Expr::str("\""),
                        ],
                    )],
                )
                .cast("decimal(10,2)");
                vec![SelectColumn::new(savings, "estimated_monthly_savings")]
            },
        ),
        ViewSpec::check(
            "z4aubrnsmz",
            "UnassociatedElasticIPAddresses_view",
            None,
            |_| Vec::new(),
        ),
        ViewSpec::check(
            "hjlmh88um8",
            "IdleLoadBalancers_view",
            Some("load balancer name"),
            |t| {
                vec![SelectColumn::new(
                    currency(t, "estimated monthly savings", "decimal(18,2)"),
                    "estimated_monthly_savings",
                )]
            },
        ),
        summary_view(),
        ViewSpec::check(
            "cx3c2r1chu",
            "EC2ReservedInstancesOptimization_view",
            None,
            |t| {
                [
                    (
                        "estimated savings with recommendation monthly",
                        "estimated_savings_with_recommendation_monthly",
                    ),
                    ("upfront cost of ris", "upfront_cost_of_ris"),
                    ("estimated cost of ris monthly", "estimated_cost_of_ris_monthly"),
                    (
                        "estimated on-demand cost post recommended ri purchase monthly",
                        "estimated_on-demand_cost_post_recommended_ri_purchase_monthly",
                    ),
                ]
                .into_iter()
                .map(|(column, alias)| {
                    SelectColumn::new(currency(t, column, "decimal(18,2)"), alias)
                })
                .collect()
            },
        ),
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

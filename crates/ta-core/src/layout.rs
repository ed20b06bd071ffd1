//! Object storage layout.
//!
//! Partitions are `year/month/day` without zero padding, which is what the
//! Glue crawler and the existing Athena tables were built against.

use crate::ids::{AccountId, CheckId};
use chrono::{DateTime, Datelike, Utc};

/// Root prefix for Trusted Advisor reports.
pub const REPORTS_PREFIX: &str = "TA-Reports";

/// Root prefix for tag exports.
pub const TAGS_PREFIX: &str = "Tags";

/// Root prefix for assume-role failure logs.
pub const ASSUME_ROLE_FAILURE_PREFIX: &str = "Logs/AssumeRoleFailure";

/// Root prefix for Athena query results under the output bucket.
pub const QUERY_OUTPUT_PREFIX: &str = "AthenaOutputs";

/// `year/month/day` partition of a timestamp.
pub fn date_partition(at: DateTime<Utc>) -> String {
    format!("{}/{}/{}", at.year(), at.month(), at.day())
}

/// `TA-Reports/<category>/check_<checkId>/<y>/<m>/<d>/`
pub fn details_prefix(category: &str, check_id: &CheckId, at: DateTime<Utc>) -> String {
    format!(
        "{}/{}/check_{}/{}/",
        REPORTS_PREFIX,
        category,
        check_id,
        date_partition(at)
    )
}

/// `TA-Reports/<category>/Summary/<y>/<m>/<d>/`
pub fn summary_prefix(category: &str, at: DateTime<Utc>) -> String {
    format!("{}/{}/Summary/{}/", REPORTS_PREFIX, category, date_partition(at))
}

/// `Tags/<resourceType>/<y>/<m>/<d>/`
pub fn tags_prefix(resource_type: &str, at: DateTime<Utc>) -> String {
    format!("{}/{}/{}/", TAGS_PREFIX, resource_type, date_partition(at))
}

/// `Logs/AssumeRoleFailure/<y>/<m>/<d>/<accountId>.log`
pub fn assume_role_failure_key(account_id: &AccountId, at: DateTime<Utc>) -> String {
    format!(
        "{}/{}/{}.log",
        ASSUME_ROLE_FAILURE_PREFIX,
        date_partition(at),
        account_id
    )
}

/// `s3://<outputBucket>/AthenaOutputs/<y>/<m>/<d>/<queryId>/`
pub fn query_output_location(output_bucket: &str, query_id: &str, at: DateTime<Utc>) -> String {
    format!(
        "s3://{}/{}/{}/{}/",
        output_bucket.trim_end_matches('/'),
        QUERY_OUTPUT_PREFIX,
        date_partition(at),
        query_id
    )
}

/// `<checkId>_<accountId>_<Date>_<HH-MM-SS>.csv`
pub fn details_file_name(
    check_id: &CheckId,
    account_id: &AccountId,
    run_date: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_{}_{}.csv",
        check_id,
        account_id,
        run_date,
        at.format("%H-%M-%S")
    )
}

/// `<checkId>_<accountId>_Summary_<Date>_<HH-MM-SS>.csv`
pub fn summary_file_name(
    check_id: &CheckId,
    account_id: &AccountId,
    run_date: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_Summary_{}_{}.csv",
        check_id,
        account_id,
        run_date,
        at.format("%H-%M-%S")
    )
}

/// `<resourceType>_<accountId>_<region>_<Date>_<HH-MM-SS>.csv`
pub fn tags_file_name(
    resource_type: &str,
    account_id: &AccountId,
    region: &str,
    run_date: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_{}_{}_{}.csv",
        resource_type,
        account_id,
        region,
        run_date,
        at.format("%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 6).unwrap()
    }

    fn check() -> CheckId {
        CheckId::try_new("Qch7DwouX1").unwrap()
    }

    fn account() -> AccountId {
        AccountId::try_new("123456789012").unwrap()
    }

    #[test]
    fn test_partition_not_zero_padded() {
        assert_eq!(date_partition(at()), "2024/3/9");
    }

    #[test]
    fn test_report_prefixes() {
        assert_eq!(
            details_prefix("cost_optimizing", &check(), at()),
            "TA-Reports/cost_optimizing/check_Qch7DwouX1/2024/3/9/"
        );
        assert_eq!(
            summary_prefix("cost_optimizing", at()),
            "TA-Reports/cost_optimizing/Summary/2024/3/9/"
        );
    }

    #[test]
    fn test_tags_prefix() {
        assert_eq!(tags_prefix("ec2:instance", at()), "Tags/ec2:instance/2024/3/9/");
    }

    #[test]
    fn test_assume_role_failure_key() {
        assert_eq!(
            assume_role_failure_key(&account(), at()),
            "Logs/AssumeRoleFailure/2024/3/9/123456789012.log"
        );
    }

    #[test]
    fn test_query_output_location() {
        assert_eq!(
            query_output_location("results-bucket/", "Query_summary", at()),
            "s3://results-bucket/AthenaOutputs/2024/3/9/Query_summary/"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            details_file_name(&check(), &account(), "03-09-2024", at()),
            "Qch7DwouX1_123456789012_03-09-2024_14-05-06.csv"
        );
        assert_eq!(
            summary_file_name(&check(), &account(), "03-09-2024", at()),
            "Qch7DwouX1_123456789012_Summary_03-09-2024_14-05-06.csv"
        );
        assert_eq!(
            tags_file_name("ec2:instance", &account(), "us-east-1", "03-09-2024", at()),
            "ec2:instance_123456789012_us-east-1_03-09-2024_14-05-06.csv"
        );
    }
}

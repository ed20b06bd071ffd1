//! Build the per-branch records handed to workflow fan-out.

use crate::check::CheckDescription;
use crate::event::{AccountRecord, CheckRecord, TagTaskRecord};

/// Accounts per workflow execution. Step Functions caps execution input at
/// 32,768 characters; fifty account records stay well below it.
pub const ACCOUNT_BATCH_SIZE: usize = 50;

/// Split accounts into execution-sized batches.
pub fn account_batches(accounts: &[AccountRecord]) -> impl Iterator<Item = &[AccountRecord]> {
    accounts.chunks(ACCOUNT_BATCH_SIZE)
}

/// One record per check whose category is configured.
pub fn check_records(
    checks: &[CheckDescription],
    categories: &[String],
    language: &str,
    account: &AccountRecord,
) -> Vec<CheckRecord> {
    checks
        .iter()
        .filter(|check| categories.iter().any(|c| *c == check.category))
        .map(|check| CheckRecord {
            check_id: check.id.clone(),
            check_name: check.name.clone(),
            category: check.category.clone(),
            language: language.to_string(),
            account: account.clone(),
        })
        .collect()
}

/// One record per (resource type, region), resource types outermost.
pub fn tag_tasks(
    resource_types: &[String],
    regions: &[String],
    account: &AccountRecord,
) -> Vec<TagTaskRecord> {
    resource_types
        .iter()
        .flat_map(|resource_type| {
            regions.iter().map(move |region| TagTaskRecord {
                resource_type: resource_type.clone(),
                region: region.clone(),
                account: account.clone(),
            })
        })
        .collect()
}

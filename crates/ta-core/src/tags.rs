//! Merge tagged resources into one CSV row per resource ARN.

use crate::event::TagTaskRecord;
use crate::report::CsvTable;
use std::collections::HashMap;

/// Fixed columns of a tag export, followed by one column per tag key.
pub const TAG_COLUMNS: [&str; 9] = [
    "Date",
    "DateTime",
    "AccountId",
    "AccountName",
    "AccountEmail",
    "RegionName",
    "ResourceType",
    "ResourceArn",
    "ResourceId",
];

/// A resource and its tags as returned by the tagging API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResource {
    pub arn: String,
    pub tags: Vec<(String, String)>,
}

/// Resource id portion of an ARN: text after the last `/`, else after the
/// last `:`, else empty.
pub fn resource_id_from_arn(arn: &str) -> &str {
    if let Some(pos) = arn.rfind('/') {
        &arn[pos + 1..]
    } else if let Some(pos) = arn.rfind(':') {
        &arn[pos + 1..]
    } else {
        ""
    }
}

/// Collects tag values per ARN across the per-key listing passes.
///
/// Rows keep the order in which ARNs were first seen.
#[derive(Debug)]
pub struct TagCollector {
    keys: Vec<String>,
    order: Vec<String>,
    values: HashMap<String, HashMap<String, String>>,
}

impl TagCollector {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            order: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Record the value of `key` for every resource that carries it.
    pub fn add(&mut self, key: &str, resources: &[TaggedResource]) {
        for resource in resources {
            for (tag_key, tag_value) in &resource.tags {
                if tag_key != key {
                    continue;
                }
                if !self.values.contains_key(&resource.arn) {
                    self.order.push(resource.arn.clone());
                }
                self.values
                    .entry(resource.arn.clone())
                    .or_default()
                    .insert(key.to_string(), tag_value.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build the export table for one (account, region, resource type) task.
    pub fn into_table(self, task: &TagTaskRecord) -> CsvTable {
        let header = TAG_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.keys.iter().cloned())
            .collect();
        let mut table = CsvTable::new(header);
        let account = &task.account;
        for arn in &self.order {
            let tags = &self.values[arn];
            let mut row = vec![
                account.date.clone(),
                account.date_time.clone(),
                account.account_id.to_string(),
                account.account_name.clone(),
                account.account_email.clone(),
                task.region.clone(),
                task.resource_type.clone(),
                arn.clone(),
                resource_id_from_arn(arn).to_string(),
            ];
            row.extend(
                self.keys
                    .iter()
                    .map(|key| tags.get(key).cloned().unwrap_or_default()),
            );
            table.rows.push(row);
        }
        table
    }
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;

//! In-memory collaborators for tests.
//!
//! Each fake records the calls it receives so tests can assert on what a
//! handler did, not only on what it returned.

use crate::error::{AwsError, AwsResult};
use crate::traits::{
    AccountDirectory, Crawler, MemberClients, ObjectStore, QueryEngine, QueryRequest,
    RegionDirectory, RoleAssumer, SessionCredentials, TableCatalog, TaggingApi, TrustedAdvisor,
    WorkflowStarter,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use ta_core::{
    AccountId, CheckDescription, CheckId, CheckRefreshStatus, CheckResult, OrgAccount,
    RefreshStatus, TaggedResource,
};

/// Grants every role except those of accounts listed as denied.
#[derive(Debug, Default)]
pub struct FakeRoleAssumer {
    denied: HashSet<String>,
    assumed: Mutex<Vec<String>>,
}

impl FakeRoleAssumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(mut self, account_id: &str) -> Self {
        self.denied.insert(account_id.to_string());
        self
    }

    /// Role ARNs assumed so far.
    pub fn assumed(&self) -> Vec<String> {
        self.assumed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleAssumer for FakeRoleAssumer {
    async fn assume_role(
        &self,
        account_id: &AccountId,
        role_arn: &str,
    ) -> AwsResult<SessionCredentials> {
        if self.denied.contains(account_id.as_str()) {
            return Err(AwsError::AssumeRoleDenied {
                account_id: account_id.to_string(),
                message: format!(
                    "An error occurred (AccessDenied) when calling the AssumeRole operation: \
                     not authorized to perform sts:AssumeRole on resource {}",
                    role_arn
                ),
            });
        }
        self.assumed.lock().unwrap().push(role_arn.to_string());
        Ok(SessionCredentials {
            access_key_id: format!("ASIA{}", account_id),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
        })
    }
}

/// Trusted Advisor with canned responses per check.
#[derive(Debug, Default)]
pub struct FakeTrustedAdvisor {
    checks: Vec<CheckDescription>,
    refresh: HashMap<String, RefreshStatus>,
    statuses: HashMap<String, CheckRefreshStatus>,
    results: HashMap<String, CheckResult>,
    refreshed: Mutex<Vec<String>>,
}

impl FakeTrustedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checks(mut self, checks: Vec<CheckDescription>) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_refresh(mut self, check_id: &str, status: RefreshStatus) -> Self {
        self.refresh.insert(check_id.to_string(), status);
        self
    }

    pub fn with_status(mut self, status: CheckRefreshStatus) -> Self {
        self.statuses.insert(status.check_id.to_string(), status);
        self
    }

    pub fn with_result(mut self, result: CheckResult) -> Self {
        self.results.insert(result.check_id.to_string(), result);
        self
    }

    /// Check ids a refresh was requested for.
    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().unwrap().clone()
    }
}

fn unknown_check(operation: &str, check_id: &CheckId) -> AwsError {
    AwsError::service(
        operation,
        format!("InvalidParameterValueException: unknown check {}", check_id),
    )
}

#[async_trait]
impl TrustedAdvisor for FakeTrustedAdvisor {
    async fn describe_checks(&self, _language: &str) -> AwsResult<Vec<CheckDescription>> {
        Ok(self.checks.clone())
    }

    async fn refresh_check(&self, check_id: &CheckId) -> AwsResult<RefreshStatus> {
        self.refreshed.lock().unwrap().push(check_id.to_string());
        self.refresh
            .get(check_id.as_str())
            .cloned()
            .ok_or_else(|| unknown_check("support:RefreshTrustedAdvisorCheck", check_id))
    }

    async fn refresh_status(&self, check_id: &CheckId) -> AwsResult<CheckRefreshStatus> {
        self.statuses.get(check_id.as_str()).cloned().ok_or_else(|| {
            unknown_check("support:DescribeTrustedAdvisorCheckRefreshStatuses", check_id)
        })
    }

    async fn check_result(&self, check_id: &CheckId, _language: &str) -> AwsResult<CheckResult> {
        self.results
            .get(check_id.as_str())
            .cloned()
            .ok_or_else(|| unknown_check("support:DescribeTrustedAdvisorCheckResult", check_id))
    }
}

/// Tagging API over a fixed resource list, keyed by resource type.
#[derive(Debug, Default)]
pub struct FakeTagging {
    resources: HashMap<String, Vec<TaggedResource>>,
}

impl FakeTagging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource_type: &str, arn: &str, tags: &[(&str, &str)]) -> Self {
        self.resources
            .entry(resource_type.to_string())
            .or_default()
            .push(TaggedResource {
                arn: arn.to_string(),
                tags: tags
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        self
    }
}

#[async_trait]
impl TaggingApi for FakeTagging {
    async fn tagged_resources(
        &self,
        resource_type: &str,
        tag_key: &str,
    ) -> AwsResult<Vec<TaggedResource>> {
        Ok(self
            .resources
            .get(resource_type)
            .map(|list| {
                list.iter()
                    .filter(|r| r.tags.iter().any(|(k, _)| k == tag_key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Hands out the same fakes for every member account.
pub struct FakeMemberClients {
    trusted_advisor: Arc<FakeTrustedAdvisor>,
    tagging: Arc<FakeTagging>,
    tagging_regions: Mutex<Vec<String>>,
}

impl FakeMemberClients {
    pub fn new(trusted_advisor: Arc<FakeTrustedAdvisor>, tagging: Arc<FakeTagging>) -> Self {
        Self {
            trusted_advisor,
            tagging,
            tagging_regions: Mutex::new(Vec::new()),
        }
    }

    /// Regions tagging clients were built for.
    pub fn tagging_regions(&self) -> Vec<String> {
        self.tagging_regions.lock().unwrap().clone()
    }
}

impl MemberClients for FakeMemberClients {
    fn trusted_advisor(&self, _credentials: &SessionCredentials) -> Arc<dyn TrustedAdvisor> {
        self.trusted_advisor.clone()
    }

    fn tagging(&self, _credentials: &SessionCredentials, region: &str) -> Arc<dyn TaggingApi> {
        self.tagging_regions.lock().unwrap().push(region.to_string());
        self.tagging.clone()
    }
}

/// Object store backed by a map of `(bucket, key)` to bytes.
#[derive(Debug, Default)]
pub struct FakeObjectStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        self
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> AwsResult<()> {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> AwsResult<()> {
        let body = tokio::fs::read(path).await?;
        self.put_object(bucket, key, body).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> AwsResult<Vec<u8>> {
        self.object(bucket, key).ok_or_else(|| {
            AwsError::service("s3:GetObject", format!("NoSuchKey: {}/{}", bucket, key))
        })
    }
}

/// Glue catalog with a fixed set of `database.table` names.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    tables: HashSet<String>,
    crawls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, database: &str, table: &str) -> Self {
        self.tables.insert(format!("{}.{}", database, table));
        self
    }

    /// Crawlers started so far.
    pub fn crawls(&self) -> Vec<String> {
        self.crawls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TableCatalog for FakeCatalog {
    async fn table_exists(&self, database: &str, table: &str) -> AwsResult<bool> {
        Ok(self.tables.contains(&format!("{}.{}", database, table)))
    }
}

#[async_trait]
impl Crawler for FakeCatalog {
    async fn start_crawler(&self, name: &str) -> AwsResult<()> {
        self.crawls.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

/// Records submitted queries and returns sequential execution ids.
#[derive(Debug, Default)]
pub struct FakeQueryEngine {
    queries: Mutex<Vec<QueryRequest>>,
}

impl FakeQueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> Vec<QueryRequest> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryEngine for FakeQueryEngine {
    async fn start_query(&self, request: &QueryRequest) -> AwsResult<String> {
        let mut queries = self.queries.lock().unwrap();
        queries.push(request.clone());
        Ok(format!("query-{}", queries.len()))
    }
}

/// A started workflow execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedExecution {
    pub state_machine_arn: String,
    pub input: String,
}

/// Records started executions and returns synthetic execution ARNs.
#[derive(Debug, Default)]
pub struct FakeWorkflows {
    executions: Mutex<Vec<StartedExecution>>,
}

impl FakeWorkflows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executions(&self) -> Vec<StartedExecution> {
        self.executions.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowStarter for FakeWorkflows {
    async fn start_execution(&self, state_machine_arn: &str, input: &str) -> AwsResult<String> {
        let mut executions = self.executions.lock().unwrap();
        executions.push(StartedExecution {
            state_machine_arn: state_machine_arn.to_string(),
            input: input.to_string(),
        });
        Ok(format!(
            "{}:execution-{}",
            state_machine_arn.replace(":stateMachine:", ":execution:"),
            executions.len()
        ))
    }
}

/// Fixed Organizations listing.
#[derive(Debug, Default)]
pub struct FakeAccountDirectory {
    accounts: Vec<OrgAccount>,
}

impl FakeAccountDirectory {
    pub fn new(accounts: Vec<OrgAccount>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl AccountDirectory for FakeAccountDirectory {
    async fn list_accounts(&self) -> AwsResult<Vec<OrgAccount>> {
        Ok(self.accounts.clone())
    }
}

/// Fixed region listing.
#[derive(Debug, Default)]
pub struct FakeRegionDirectory {
    regions: Vec<String>,
}

impl FakeRegionDirectory {
    pub fn new(regions: &[&str]) -> Self {
        Self {
            regions: regions.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[async_trait]
impl RegionDirectory for FakeRegionDirectory {
    async fn list_regions(&self) -> AwsResult<Vec<String>> {
        Ok(self.regions.clone())
    }
}

#[cfg(test)]
#[path = "fakes_test.rs"]
mod tests;

//! Collaborator traits for the AWS services the pipeline calls.
//!
//! Handlers receive these as trait objects so they can run against the SDK
//! implementations in production and in-memory fakes in tests.

use crate::error::AwsResult;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use ta_core::{
    AccountId, CheckDescription, CheckId, CheckRefreshStatus, CheckResult, OrgAccount,
    RefreshStatus, TaggedResource,
};

/// Session name recorded in CloudTrail for every cross-account call.
pub const ROLE_SESSION_NAME: &str = "AWSTrustedAdvisorExplorerAssumeRole";

/// The Support API is only served from this region.
pub const SUPPORT_REGION: &str = "us-east-1";

/// Temporary credentials of an assumed member-account role.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

/// STS role assumption into member accounts.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    /// Assume `role_arn` in `account_id`. Access denial is reported as
    /// `AwsError::AssumeRoleDenied`.
    async fn assume_role(
        &self,
        account_id: &AccountId,
        role_arn: &str,
    ) -> AwsResult<SessionCredentials>;
}

/// Trusted Advisor operations of the Support API.
#[async_trait]
pub trait TrustedAdvisor: Send + Sync {
    async fn describe_checks(&self, language: &str) -> AwsResult<Vec<CheckDescription>>;

    /// Ask for a check refresh; returns the status the request was accepted with.
    async fn refresh_check(&self, check_id: &CheckId) -> AwsResult<RefreshStatus>;

    async fn refresh_status(&self, check_id: &CheckId) -> AwsResult<CheckRefreshStatus>;

    async fn check_result(&self, check_id: &CheckId, language: &str) -> AwsResult<CheckResult>;
}

/// Resource Groups Tagging API.
#[async_trait]
pub trait TaggingApi: Send + Sync {
    /// Every resource of `resource_type` carrying `tag_key`, across all pages.
    async fn tagged_resources(
        &self,
        resource_type: &str,
        tag_key: &str,
    ) -> AwsResult<Vec<TaggedResource>>;
}

/// Builds clients that act inside a member account.
pub trait MemberClients: Send + Sync {
    fn trusted_advisor(&self, credentials: &SessionCredentials) -> Arc<dyn TrustedAdvisor>;

    fn tagging(&self, credentials: &SessionCredentials, region: &str) -> Arc<dyn TaggingApi>;
}

/// S3 object access. Writes grant the bucket owner full control.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> AwsResult<()>;

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> AwsResult<()>;

    async fn get_object(&self, bucket: &str, key: &str) -> AwsResult<Vec<u8>>;
}

/// Glue Data Catalog lookups.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Whether `table` exists in `database`. A missing table is not an error.
    async fn table_exists(&self, database: &str, table: &str) -> AwsResult<bool>;
}

/// Glue crawler control.
#[async_trait]
pub trait Crawler: Send + Sync {
    async fn start_crawler(&self, name: &str) -> AwsResult<()>;
}

/// One Athena query submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
    pub database: String,
    pub work_group: String,
    pub output_location: String,
}

/// Athena query submission. Results are encrypted with SSE-S3.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Start the query and return its execution id without waiting for it.
    async fn start_query(&self, request: &QueryRequest) -> AwsResult<String>;
}

/// Step Functions execution starts.
#[async_trait]
pub trait WorkflowStarter: Send + Sync {
    /// Start `state_machine_arn` with a JSON `input`; returns the execution ARN.
    async fn start_execution(&self, state_machine_arn: &str, input: &str) -> AwsResult<String>;
}

/// AWS Organizations account listing.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn list_accounts(&self) -> AwsResult<Vec<OrgAccount>>;
}

/// EC2 region listing.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    /// Regions enabled for the calling account.
    async fn list_regions(&self) -> AwsResult<Vec<String>>;
}

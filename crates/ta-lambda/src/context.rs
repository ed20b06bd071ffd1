//! Runtime context for handler invocations

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use ta_aws::sdk::{
    AthenaQueryEngine, Ec2RegionDirectory, GlueService, OrganizationsDirectory, S3ObjectStore,
    SdkConfig, SdkMemberClients, StepFunctionsStarter, StsRoleAssumer, SupportTrustedAdvisor,
};
use ta_aws::{
    AccountDirectory, Crawler, MemberClients, ObjectStore, QueryEngine, RegionDirectory,
    RoleAssumer, TableCatalog, TrustedAdvisor, WorkflowStarter,
};
use ta_core::config::CommonConfig;
use ta_core::{EnvSource, MaskedLog, Masker};

use crate::metrics::{HttpUsageReporter, UsageReporter};

/// Configuration source shared across invocations.
pub type SharedEnv = Arc<dyn EnvSource + Send + Sync>;

/// AWS collaborators, built once per process and shared by invocations.
#[derive(Clone)]
pub struct Services {
    pub roles: Arc<dyn RoleAssumer>,
    pub members: Arc<dyn MemberClients>,
    /// Trusted Advisor of the management account
    pub support: Arc<dyn TrustedAdvisor>,
    pub objects: Arc<dyn ObjectStore>,
    pub catalog: Arc<dyn TableCatalog>,
    pub crawler: Arc<dyn Crawler>,
    pub queries: Arc<dyn QueryEngine>,
    pub workflows: Arc<dyn WorkflowStarter>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub regions: Arc<dyn RegionDirectory>,
    pub usage: Arc<dyn UsageReporter>,
}

impl Services {
    /// Wire every collaborator to the AWS SDK.
    pub fn from_sdk(config: &SdkConfig) -> Self {
        let glue = Arc::new(GlueService::new(config));
        Self {
            roles: Arc::new(StsRoleAssumer::new(config)),
            members: Arc::new(SdkMemberClients::new(config)),
            support: Arc::new(SupportTrustedAdvisor::new(config)),
            objects: Arc::new(S3ObjectStore::new(config)),
            catalog: glue.clone(),
            crawler: glue,
            queries: Arc::new(AthenaQueryEngine::new(config)),
            workflows: Arc::new(StepFunctionsStarter::new(config)),
            accounts: Arc::new(OrganizationsDirectory::new(config)),
            regions: Arc::new(Ec2RegionDirectory::new(config)),
            usage: Arc::new(HttpUsageReporter::new()),
        }
    }
}

/// Everything one invocation needs: collaborators, configuration source,
/// the masked logger and the invocation timestamp.
pub struct HandlerContext {
    pub services: Services,
    env: SharedEnv,
    pub log: MaskedLog,
    /// Fixed at the start of the invocation so every key and file name of
    /// one run agrees on the date
    pub now: DateTime<Utc>,
}

impl HandlerContext {
    pub fn new(services: Services, env: SharedEnv, now: DateTime<Utc>) -> Result<Self> {
        let common = CommonConfig::load(env.as_ref())?;
        Ok(Self {
            services,
            env,
            log: MaskedLog::new(Masker::new(common.mask_pii)),
            now,
        })
    }

    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    pub fn masker(&self) -> Masker {
        self.log.masker()
    }
}

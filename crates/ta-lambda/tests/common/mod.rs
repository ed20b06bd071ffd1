//! Shared fixtures for handler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use ta_aws::fakes::{
    FakeAccountDirectory, FakeCatalog, FakeMemberClients, FakeObjectStore, FakeQueryEngine,
    FakeRegionDirectory, FakeRoleAssumer, FakeTagging, FakeTrustedAdvisor, FakeWorkflows,
};
use ta_core::{AccountId, AccountRecord, OrgAccount, RunStamp};
use ta_lambda::metrics::{UsageMetric, UsageReporter};
use ta_lambda::{HandlerContext, Services};

/// Records metrics instead of posting them.
#[derive(Default)]
pub struct RecordingReporter {
    pub reported: Mutex<Vec<UsageMetric>>,
}

#[async_trait]
impl UsageReporter for RecordingReporter {
    async fn report(&self, metric: &UsageMetric) {
        self.reported.lock().unwrap().push(metric.clone());
    }
}

/// Fakes behind one handler context, kept typed so tests can inspect them.
pub struct Harness {
    pub env: HashMap<String, String>,
    pub roles: Arc<FakeRoleAssumer>,
    pub member_advisor: Arc<FakeTrustedAdvisor>,
    pub management_advisor: Arc<FakeTrustedAdvisor>,
    pub tagging: Arc<FakeTagging>,
    pub members: Arc<FakeMemberClients>,
    pub objects: Arc<FakeObjectStore>,
    pub catalog: Arc<FakeCatalog>,
    pub queries: Arc<FakeQueryEngine>,
    pub workflows: Arc<FakeWorkflows>,
    pub accounts: Arc<FakeAccountDirectory>,
    pub regions: Arc<FakeRegionDirectory>,
    pub usage: Arc<RecordingReporter>,
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 6).unwrap()
}

pub fn account(id: &str) -> AccountRecord {
    AccountRecord::new(
        AccountId::try_new(id).unwrap(),
        "Production",
        "ops@example.com",
        &RunStamp::at(now()),
    )
}

pub fn org_account(id: &str, status: &str) -> OrgAccount {
    OrgAccount {
        id: id.to_string(),
        name: format!("account-{}", id),
        email: format!("{}@example.com", id),
        status: status.to_string(),
    }
}

impl Harness {
    pub fn new(env: &[(&str, &str)]) -> Self {
        let tagging = Arc::new(FakeTagging::new());
        let member_advisor = Arc::new(FakeTrustedAdvisor::new());
        Self {
            env: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            roles: Arc::new(FakeRoleAssumer::new()),
            members: Arc::new(FakeMemberClients::new(
                member_advisor.clone(),
                tagging.clone(),
            )),
            member_advisor,
            management_advisor: Arc::new(FakeTrustedAdvisor::new()),
            tagging,
            objects: Arc::new(FakeObjectStore::new()),
            catalog: Arc::new(FakeCatalog::new()),
            queries: Arc::new(FakeQueryEngine::new()),
            workflows: Arc::new(FakeWorkflows::new()),
            accounts: Arc::new(FakeAccountDirectory::default()),
            regions: Arc::new(FakeRegionDirectory::default()),
            usage: Arc::new(RecordingReporter::default()),
        }
    }

    pub fn with_roles(mut self, roles: FakeRoleAssumer) -> Self {
        self.roles = Arc::new(roles);
        self
    }

    /// Replace the Trusted Advisor seen inside member accounts.
    pub fn with_member_advisor(mut self, advisor: FakeTrustedAdvisor) -> Self {
        self.member_advisor = Arc::new(advisor);
        self.members = Arc::new(FakeMemberClients::new(
            self.member_advisor.clone(),
            self.tagging.clone(),
        ));
        self
    }

    pub fn with_management_advisor(mut self, advisor: FakeTrustedAdvisor) -> Self {
        self.management_advisor = Arc::new(advisor);
        self
    }

    pub fn with_tagging(mut self, tagging: FakeTagging) -> Self {
        self.tagging = Arc::new(tagging);
        self.members = Arc::new(FakeMemberClients::new(
            self.member_advisor.clone(),
            self.tagging.clone(),
        ));
        self
    }

    pub fn with_objects(mut self, objects: FakeObjectStore) -> Self {
        self.objects = Arc::new(objects);
        self
    }

    pub fn with_catalog(mut self, catalog: FakeCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<OrgAccount>) -> Self {
        self.accounts = Arc::new(FakeAccountDirectory::new(accounts));
        self
    }

    pub fn with_regions(mut self, regions: &[&str]) -> Self {
        self.regions = Arc::new(FakeRegionDirectory::new(regions));
        self
    }

    pub fn services(&self) -> Services {
        Services {
            roles: self.roles.clone(),
            members: self.members.clone(),
            support: self.management_advisor.clone(),
            objects: self.objects.clone(),
            catalog: self.catalog.clone(),
            crawler: self.catalog.clone(),
            queries: self.queries.clone(),
            workflows: self.workflows.clone(),
            accounts: self.accounts.clone(),
            regions: self.regions.clone(),
            usage: self.usage.clone(),
        }
    }

    pub fn context(&self) -> HandlerContext {
        HandlerContext::new(self.services(), Arc::new(self.env.clone()), now()).unwrap()
    }
}

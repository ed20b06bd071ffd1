use super::{member_credentials, present, sdk_error, tagging::TaggingClient};
use crate::error::{AwsError, AwsResult};
use crate::traits::{MemberClients, SessionCredentials, TaggingApi, TrustedAdvisor, SUPPORT_REGION};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_support::config::{Builder, Region};
use aws_sdk_support::types::{
    TrustedAdvisorCategorySpecificSummary, TrustedAdvisorCheckRefreshStatus,
    TrustedAdvisorCheckResult, TrustedAdvisorResourceDetail, TrustedAdvisorResourcesSummary,
};
use aws_sdk_support::Client;
use std::sync::Arc;
use ta_core::{
    CheckDescription, CheckId, CheckRefreshStatus, CheckResult, CostOptimizingSummary,
    FlaggedResource, RefreshStatus, ResourcesSummary,
};

pub struct SupportTrustedAdvisor {
    client: Client,
}

impl SupportTrustedAdvisor {
    /// Client for the calling account.
    pub fn new(config: &SdkConfig) -> Self {
        let conf = Builder::from(config)
            .region(Region::new(SUPPORT_REGION))
            .build();
        Self {
            client: Client::from_conf(conf),
        }
    }

    /// Client acting inside a member account.
    pub fn with_credentials(config: &SdkConfig, session: &SessionCredentials) -> Self {
        let conf = Builder::from(config)
            .region(Region::new(SUPPORT_REGION))
            .credentials_provider(member_credentials(session))
            .build();
        Self {
            client: Client::from_conf(conf),
        }
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn refresh_status(status: &TrustedAdvisorCheckRefreshStatus) -> Option<CheckRefreshStatus> {
    let check_id = CheckId::try_new(text(present::<&str>(status.check_id())))?;
    let millis = present::<i64>(status.millis_until_next_refreshable()).unwrap_or_default();
    Some(CheckRefreshStatus {
        check_id,
        status: RefreshStatus::parse(&text(present::<&str>(status.status()))),
        millis_until_next_refreshable: millis.max(0) as u64,
    })
}

fn resources_summary(summary: Option<&TrustedAdvisorResourcesSummary>) -> ResourcesSummary {
    summary
        .map(|s| ResourcesSummary {
            processed: present::<i64>(s.resources_processed()).unwrap_or_default(),
            flagged: present::<i64>(s.resources_flagged()).unwrap_or_default(),
            ignored: present::<i64>(s.resources_ignored()).unwrap_or_default(),
            suppressed: present::<i64>(s.resources_suppressed()).unwrap_or_default(),
        })
        .unwrap_or_default()
}

fn cost_optimizing(
    summary: Option<&TrustedAdvisorCategorySpecificSummary>,
) -> Option<CostOptimizingSummary> {
    let cost = summary?.cost_optimizing()?;
    Some(CostOptimizingSummary {
        estimated_monthly_savings: present::<f64>(cost.estimated_monthly_savings())
            .unwrap_or_default(),
        estimated_percent_monthly_savings: present::<f64>(
            cost.estimated_percent_monthly_savings(),
        )
        .unwrap_or_default(),
    })
}

fn flagged_resource(detail: &TrustedAdvisorResourceDetail) -> FlaggedResource {
    FlaggedResource {
        status: text(present::<&str>(detail.status())),
        region: detail.region().map(str::to_string),
        resource_id: text(present::<&str>(detail.resource_id())),
        is_suppressed: present::<bool>(detail.is_suppressed()).unwrap_or(false),
        metadata: detail
            .metadata()
            .iter()
            .map(|value| present::<String>(value.clone()))
            .collect(),
    }
}

fn check_result(result: &TrustedAdvisorCheckResult, check_id: &CheckId) -> CheckResult {
    CheckResult {
        check_id: CheckId::try_new(text(present::<&str>(result.check_id())))
            .unwrap_or_else(|| check_id.clone()),
        status: text(present::<&str>(result.status())),
        resources_summary: resources_summary(present::<&TrustedAdvisorResourcesSummary>(
            result.resources_summary(),
        )),
        cost_optimizing: cost_optimizing(present::<&TrustedAdvisorCategorySpecificSummary>(
            result.category_specific_summary(),
        )),
        flagged_resources: result.flagged_resources().iter().map(flagged_resource).collect(),
    }
}

#[async_trait]
impl TrustedAdvisor for SupportTrustedAdvisor {
    async fn describe_checks(&self, language: &str) -> AwsResult<Vec<CheckDescription>> {
        let output = self
            .client
            .describe_trusted_advisor_checks()
            .language(language)
            .send()
            .await
            .map_err(|e| sdk_error("support:DescribeTrustedAdvisorChecks", e))?;
        Ok(output
            .checks()
            .iter()
            .filter_map(|check| {
                Some(CheckDescription {
                    id: CheckId::try_new(text(present::<&str>(check.id())))?,
                    name: text(present::<&str>(check.name())),
                    category: text(present::<&str>(check.category())),
                })
            })
            .collect())
    }

    async fn refresh_check(&self, check_id: &CheckId) -> AwsResult<RefreshStatus> {
        const OPERATION: &str = "support:RefreshTrustedAdvisorCheck";
        let output = self
            .client
            .refresh_trusted_advisor_check()
            .check_id(check_id.as_str())
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;
        let status = present::<&TrustedAdvisorCheckRefreshStatus>(output.status())
            .ok_or_else(|| AwsError::missing_field(OPERATION, "status"))?;
        Ok(RefreshStatus::parse(&text(present::<&str>(status.status()))))
    }

    async fn refresh_status(&self, check_id: &CheckId) -> AwsResult<CheckRefreshStatus> {
        const OPERATION: &str = "support:DescribeTrustedAdvisorCheckRefreshStatuses";
        let output = self
            .client
            .describe_trusted_advisor_check_refresh_statuses()
            .check_ids(check_id.as_str())
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;
        output
            .statuses()
            .first()
            .and_then(refresh_status)
            .ok_or_else(|| AwsError::missing_field(OPERATION, "statuses"))
    }

    async fn check_result(&self, check_id: &CheckId, language: &str) -> AwsResult<CheckResult> {
        const OPERATION: &str = "support:DescribeTrustedAdvisorCheckResult";
        let output = self
            .client
            .describe_trusted_advisor_check_result()
            .check_id(check_id.as_str())
            .language(language.to_lowercase())
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;
        let result = output
            .result()
            .ok_or_else(|| AwsError::missing_field(OPERATION, "result"))?;
        Ok(check_result(result, check_id))
    }
}

/// Builds Support and tagging clients from assumed-role credentials.
pub struct SdkMemberClients {
    config: SdkConfig,
}

impl SdkMemberClients {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl MemberClients for SdkMemberClients {
    fn trusted_advisor(&self, credentials: &SessionCredentials) -> Arc<dyn TrustedAdvisor> {
        Arc::new(SupportTrustedAdvisor::with_credentials(
            &self.config,
            credentials,
        ))
    }

    fn tagging(&self, credentials: &SessionCredentials, region: &str) -> Arc<dyn TaggingApi> {
        Arc::new(TaggingClient::with_credentials(
            &self.config,
            credentials,
            region,
        ))
    }
}

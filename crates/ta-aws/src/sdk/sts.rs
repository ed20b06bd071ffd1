use super::{present, sdk_error};
use crate::error::{AwsError, AwsResult};
use crate::traits::{RoleAssumer, SessionCredentials, ROLE_SESSION_NAME};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_sts::Client;
use ta_core::AccountId;

const OPERATION: &str = "sts:AssumeRole";

pub struct StsRoleAssumer {
    client: Client,
}

impl StsRoleAssumer {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        account_id: &AccountId,
        role_arn: &str,
    ) -> AwsResult<SessionCredentials> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(ROLE_SESSION_NAME)
            .send()
            .await
            .map_err(|err| {
                let denied = err.as_service_error().and_then(|e| e.code()) == Some("AccessDenied");
                if denied {
                    AwsError::AssumeRoleDenied {
                        account_id: account_id.to_string(),
                        message: DisplayErrorContext(&err).to_string(),
                    }
                } else {
                    sdk_error(OPERATION, err)
                }
            })?;

        let credentials = output
            .credentials()
            .ok_or_else(|| AwsError::missing_field(OPERATION, "Credentials"))?;
        Ok(SessionCredentials {
            access_key_id: present::<&str>(credentials.access_key_id())
                .unwrap_or_default()
                .to_string(),
            secret_access_key: present::<&str>(credentials.secret_access_key())
                .unwrap_or_default()
                .to_string(),
            session_token: present::<&str>(credentials.session_token())
                .unwrap_or_default()
                .to_string(),
        })
    }
}

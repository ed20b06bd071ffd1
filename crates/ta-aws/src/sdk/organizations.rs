use super::sdk_error;
use crate::error::AwsResult;
use crate::traits::AccountDirectory;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_organizations::Client;
use ta_core::OrgAccount;

pub struct OrganizationsDirectory {
    client: Client,
}

impl OrganizationsDirectory {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl AccountDirectory for OrganizationsDirectory {
    async fn list_accounts(&self) -> AwsResult<Vec<OrgAccount>> {
        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.list_accounts();
            if let Some(token) = next_token.take() {
                request = request.next_token(token);
            }
            let output = request
                .send()
                .await
                .map_err(|e| sdk_error("organizations:ListAccounts", e))?;

            #[allow(deprecated)]
            accounts.extend(output.accounts().iter().map(|account| OrgAccount {
                id: account.id().unwrap_or_default().to_string(),
                name: account.name().unwrap_or_default().to_string(),
                email: account.email().unwrap_or_default().to_string(),
                status: account
                    .status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            }));

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(accounts)
    }
}

use super::{present, sdk_error};
use crate::error::{AwsError, AwsResult};
use crate::traits::WorkflowStarter;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sfn::Client;

const OPERATION: &str = "states:StartExecution";

pub struct StepFunctionsStarter {
    client: Client,
}

impl StepFunctionsStarter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl WorkflowStarter for StepFunctionsStarter {
    async fn start_execution(&self, state_machine_arn: &str, input: &str) -> AwsResult<String> {
        let output = self
            .client
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .input(input)
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;
        present::<&str>(output.execution_arn())
            .map(str::to_string)
            .ok_or_else(|| AwsError::missing_field(OPERATION, "executionArn"))
    }
}

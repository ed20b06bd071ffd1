use super::sdk_error;
use crate::error::{AwsError, AwsResult};
use crate::traits::{QueryEngine, QueryRequest};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_athena::types::{
    EncryptionConfiguration, EncryptionOption, QueryExecutionContext, ResultConfiguration,
};
use aws_sdk_athena::Client;

const OPERATION: &str = "athena:StartQueryExecution";

pub struct AthenaQueryEngine {
    client: Client,
}

impl AthenaQueryEngine {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl QueryEngine for AthenaQueryEngine {
    async fn start_query(&self, request: &QueryRequest) -> AwsResult<String> {
        let encryption = EncryptionConfiguration::builder()
            .encryption_option(EncryptionOption::SseS3)
            .build()
            .map_err(|e| AwsError::service(OPERATION, e.to_string()))?;
        let output = self
            .client
            .start_query_execution()
            .query_string(&request.query)
            .query_execution_context(
                QueryExecutionContext::builder()
                    .database(&request.database)
                    .build(),
            )
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(&request.output_location)
                    .encryption_configuration(encryption)
                    .build(),
            )
            .work_group(&request.work_group)
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;
        output
            .query_execution_id()
            .map(str::to_string)
            .ok_or_else(|| AwsError::missing_field(OPERATION, "QueryExecutionId"))
    }
}

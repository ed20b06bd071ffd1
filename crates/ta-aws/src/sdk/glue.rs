use super::sdk_error;
use crate::error::AwsResult;
use crate::traits::{Crawler, TableCatalog};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_glue::Client;

/// Glue Data Catalog and crawler access.
pub struct GlueService {
    client: Client,
}

impl GlueService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl TableCatalog for GlueService {
    async fn table_exists(&self, database: &str, table: &str) -> AwsResult<bool> {
        match self
            .client
            .get_table()
            .database_name(database)
            .name(table)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_entity_not_found_exception()) =>
            {
                Ok(false)
            }
            Err(err) => Err(sdk_error("glue:GetTable", err)),
        }
    }
}

#[async_trait]
impl Crawler for GlueService {
    async fn start_crawler(&self, name: &str) -> AwsResult<()> {
        self.client
            .start_crawler()
            .name(name)
            .send()
            .await
            .map_err(|e| sdk_error("glue:StartCrawler", e))?;
        Ok(())
    }
}

use super::{member_credentials, present, sdk_error};
use crate::error::AwsResult;
use crate::traits::{SessionCredentials, TaggingApi};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_resourcegroupstagging::config::{Builder, Region};
use aws_sdk_resourcegroupstagging::types::TagFilter;
use aws_sdk_resourcegroupstagging::Client;
use ta_core::TaggedResource;

pub struct TaggingClient {
    client: Client,
}

impl TaggingClient {
    /// Client acting inside a member account in `region`.
    pub fn with_credentials(config: &SdkConfig, session: &SessionCredentials, region: &str) -> Self {
        let conf = Builder::from(config)
            .region(Region::new(region.to_string()))
            .credentials_provider(member_credentials(session))
            .build();
        Self {
            client: Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl TaggingApi for TaggingClient {
    async fn tagged_resources(
        &self,
        resource_type: &str,
        tag_key: &str,
    ) -> AwsResult<Vec<TaggedResource>> {
        let mut resources = Vec::new();
        let mut pagination_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get_resources()
                .resource_type_filters(resource_type)
                .tag_filters(TagFilter::builder().key(tag_key).build());
            if let Some(token) = pagination_token.take() {
                request = request.pagination_token(token);
            }
            let output = request
                .send()
                .await
                .map_err(|e| sdk_error("tag:GetResources", e))?;

            for mapping in output.resource_tag_mapping_list() {
                let Some(arn) = mapping.resource_arn() else {
                    continue;
                };
                let tags = mapping
                    .tags()
                    .iter()
                    .map(|tag| {
                        (
                            present::<&str>(tag.key()).unwrap_or_default().to_string(),
                            present::<&str>(tag.value()).unwrap_or_default().to_string(),
                        )
                    })
                    .collect();
                resources.push(TaggedResource {
                    arn: arn.to_string(),
                    tags,
                });
            }

            // The last page carries an empty token rather than none.
            match output.pagination_token() {
                Some(next) if !next.is_empty() => pagination_token = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(resources)
    }
}

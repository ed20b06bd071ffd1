use super::sdk_error;
use crate::error::AwsResult;
use crate::traits::RegionDirectory;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::Client;

pub struct Ec2RegionDirectory {
    client: Client,
}

impl Ec2RegionDirectory {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RegionDirectory for Ec2RegionDirectory {
    async fn list_regions(&self) -> AwsResult<Vec<String>> {
        let output = self
            .client
            .describe_regions()
            .send()
            .await
            .map_err(|e| sdk_error("ec2:DescribeRegions", e))?;
        let regions: Vec<String> = output
            .regions()
            .iter()
            .filter_map(|region| region.region_name().map(str::to_string))
            .collect();
        log::info!("Got {} AWS Regions", regions.len());
        Ok(regions)
    }
}

use super::sdk_error;
use crate::error::{AwsError, AwsResult};
use crate::traits::ObjectStore;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ObjectCannedAcl, StorageClass};
use aws_sdk_s3::Client;
use std::path::Path;

pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    async fn put(&self, bucket: &str, key: &str, body: ByteStream) -> AwsResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::BucketOwnerFullControl)
            .storage_class(StorageClass::Standard)
            .body(body)
            .send()
            .await
            .map_err(|e| sdk_error("s3:PutObject", e))?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> AwsResult<()> {
        self.put(bucket, key, ByteStream::from(body)).await
    }

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> AwsResult<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| AwsError::service("s3:PutObject", e.to_string()))?;
        self.put(bucket, key, body).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> AwsResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_error("s3:GetObject", e))?;
        let data = output
            .body
            .collect()
            .await
            .map_err(|e| AwsError::service("s3:GetObject", e.to_string()))?;
        Ok(data.into_bytes().to_vec())
    }
}

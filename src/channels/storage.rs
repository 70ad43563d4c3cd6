//! Object storage: where the mail service drops inbound replies.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::error::StorageError;

/// Fetches whole objects by bucket and key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// Amazon S3 `GetObject` store.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS region/credential chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Read {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?
            .into_bytes();

        tracing::debug!(bucket, key, len = bytes.len(), "Fetched object");
        Ok(bytes.to_vec())
    }
}

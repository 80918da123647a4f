//! Document store: project file blobs in S3 with presigned retrieval.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

/// Blob storage keyed by string, with time-limited signed retrieval.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a blob under `key`. Returns `true` on success.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> bool;

    /// Produce a time-limited retrieval URL for `key`, or `None` on failure.
    async fn url(&self, key: &str, ttl_seconds: u64) -> Option<String>;
}

/// S3 implementation against a single bucket.
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(sdk_config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> bool {
        match self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %aws_sdk_s3::error::DisplayErrorContext(&err),
                    key = %key, "Failed to upload document");
                false
            }
        }
    }

    async fn url(&self, key: &str, ttl_seconds: u64) -> Option<String> {
        let presigning = match PresigningConfig::expires_in(Duration::from_secs(ttl_seconds)) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Invalid presigning TTL");
                return None;
            }
        };

        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
        {
            Ok(request) => Some(request.uri().to_string()),
            Err(err) => {
                tracing::warn!(error = %aws_sdk_s3::error::DisplayErrorContext(&err),
                    key = %key, "Failed to presign document URL");
                None
            }
        }
    }
}

//! Object storage for uploaded files.
//!
//! [`S3Storage`] writes to an S3-compatible bucket. [`PassthroughStorage`]
//! is used in test mode: it stores nothing and hands the object name back
//! as the URL.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use axum::body::Bytes;

use crate::config::StorageConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object storage error: {0}")]
    Backend(String),
}

/// Destination for uploaded bytes.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `name` and return the public URL of the object.
    async fn put(&self, name: &str, bytes: Bytes, content_type: &str)
        -> Result<String, StorageError>;
}

// ---------------------------------------------------------------------------
// S3
// ---------------------------------------------------------------------------

pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3Storage {
    /// Build a client from the ambient AWS environment (credentials, region)
    /// plus the bucket settings in `config`.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_url: config.public_url.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, key = name, size, "Object stored");
        Ok(format!("{}/{name}", self.public_url))
    }
}

// ---------------------------------------------------------------------------
// Test mode
// ---------------------------------------------------------------------------

/// Stores nothing; the returned URL is the object name itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughStorage;

#[async_trait]
impl ObjectStorage for PassthroughStorage {
    async fn put(
        &self,
        name: &str,
        _bytes: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Ok(name.to_string())
    }
}

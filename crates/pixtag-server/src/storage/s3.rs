//! S3-compatible [`ObjectStorage`] implementation.
//!
//! Built on the `object_store` crate so the same client works against AWS
//! and MinIO-style deployments with a custom endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use pixtag_core::config::StorageConfig;
use pixtag_core::{Error, Result};

use super::ObjectStorage;

/// Object storage backed by an S3-compatible bucket.
pub struct S3ObjectStorage {
    store: AmazonS3,
}

impl S3ObjectStorage {
    /// Build a client from the storage configuration.
    ///
    /// An empty endpoint leaves endpoint resolution to the SDK (plain AWS);
    /// an `http://` endpoint enables non-TLS access for local MinIO setups.
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }
        if let Some(key_id) = &config.access_key_id {
            builder = builder.with_access_key_id(key_id);
        }
        if let Some(secret) = &config.secret_access_key {
            builder = builder.with_secret_access_key(secret);
        }

        let store = builder
            .build()
            .map_err(|e| Error::storage(format!("failed to build S3 client: {e}")))?;

        Ok(Self { store })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        self.store
            .put_opts(
                &Path::from(key),
                PutPayload::from(data),
                PutOptions::from(attributes),
            )
            .await
            .map_err(|e| Error::storage(e.to_string()))?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.store
            .delete(&Path::from(key))
            .await
            .map_err(|e| Error::storage(e.to_string()))?;
        Ok(())
    }
}

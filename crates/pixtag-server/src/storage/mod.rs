//! Object-storage client abstraction.
//!
//! Handlers only see the [`ObjectStorage`] trait; the production
//! implementation talks to an S3-compatible endpoint, and tests substitute
//! a recording mock behind the same contract.

use async_trait::async_trait;
use bytes::Bytes;
use pixtag_core::Result;

mod s3;

pub use s3::S3ObjectStorage;

/// Put/delete contract against the configured bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload an object under `key` with the given content type.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Delete the object stored under `key`.
    async fn delete_object(&self, key: &str) -> Result<()>;
}

//! Storage module for video blobs
//!
//! Provides the `ObjectStorage` seam used by the video service plus the
//! MinIO/S3-compatible client that implements it in production.

mod minio_client;

use async_trait::async_trait;

use crate::core::error::Result;

pub use minio_client::MinIOClient;

/// Object storage as seen by the upload path.
///
/// Injected into the video service so tests can substitute an in-memory
/// double; the production implementation is [`MinIOClient`].
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write an object under `key` with the declared content type.
    ///
    /// The write is confirmed before this returns; a failure means nothing
    /// referencing `key` should be recorded.
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;

    /// Derive the stable public URL for `key` from bucket and endpoint
    /// configuration. Never queries the storage service.
    fn public_url(&self, key: &str) -> String;
}

//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The upload pipeline only needs a single PUT; everything else
//! about the object-store protocol is the SDK's business.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend types, used in logs and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

/// Storage abstraction trait
///
/// Backends store whole objects in one shot; there is no streaming,
/// multipart, or retry at this layer.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key` with the given content type.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

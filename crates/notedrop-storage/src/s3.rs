//! S3-compatible storage implementation.

use crate::traits::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use notedrop_core::Settings;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ObjectStore as _, PutOptions, PutPayload, Result as ObjectResult,
};

/// S3 storage implementation
#[derive(Clone, Debug)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Build a client from a settings snapshot.
    ///
    /// Credentials, endpoint, region, and bucket all come from the persisted
    /// settings record rather than the environment; the host owns where that
    /// record lives. Plain-http endpoints (local MinIO and the like) are
    /// allowed only when the endpoint itself says `http://`.
    pub fn from_settings(settings: &Settings) -> StorageResult<Self> {
        let endpoint = settings.endpoint.trim();
        let allow_http = endpoint.starts_with("http://");

        let store = AmazonS3Builder::new()
            .with_bucket_name(settings.bucket_name.clone())
            .with_region(settings.region.clone())
            .with_endpoint(endpoint.to_string())
            .with_access_key_id(settings.access_key_id.clone())
            .with_secret_access_key(settings.secret_access_key.clone())
            .with_allow_http(allow_http)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket: settings.bucket_name.clone(),
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        let size = data.len() as u64;
        let location = Path::from(key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

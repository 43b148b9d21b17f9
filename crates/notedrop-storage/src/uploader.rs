//! The uploader: settings contract, one PUT, failure classification.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use notedrop_core::{Settings, UploadError};

use crate::keys;
use crate::traits::{Storage, StorageError};

/// What a successful upload hands back to the pipeline.
#[derive(Clone, Debug)]
pub struct UploadReceipt {
    pub url: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Transport error text produced when a request dies before the server
/// answers. A cross-origin policy rejection presents exactly this way, so
/// it gets the actionable message; the match is best-effort and a miss
/// falls through to the generic path.
const SEND_FAILURE_SIGNATURE: &str = "error sending request";

/// Upload `data` under `key`.
///
/// Validates the settings contract first (every missing field is named in
/// one error, no network call is made), then issues a single PUT with no
/// retry. The whole payload is in memory; fine for images.
pub async fn upload(
    settings: &Settings,
    storage: &dyn Storage,
    key: &str,
    file_name: &str,
    content_type: &str,
    data: Bytes,
) -> Result<UploadReceipt, UploadError> {
    let missing = settings.missing_fields();
    if !missing.is_empty() {
        return Err(UploadError::ConfigIncomplete(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    storage
        .put(key, content_type, data)
        .await
        .map_err(classify_put_error)?;

    Ok(UploadReceipt {
        url: keys::public_url(settings, key),
        file_name: file_name.to_string(),
        uploaded_at: Utc::now(),
    })
}

fn classify_put_error(err: StorageError) -> UploadError {
    let cause = match err {
        StorageError::UploadFailed(cause) => cause,
        StorageError::ConfigError(cause) => cause,
    };
    if cause.contains(SEND_FAILURE_SIGNATURE) {
        UploadError::AccessPolicy { cause }
    } else {
        UploadError::Transport(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::traits::{StorageBackend, StorageResult};
    use async_trait::async_trait;

    fn complete_settings() -> Settings {
        Settings {
            endpoint: "https://s3.example.com".to_string(),
            access_key_id: "AKIA".to_string(),
            secret_access_key: "shh".to_string(),
            bucket_name: "notes".to_string(),
            ..Settings::default()
        }
    }

    /// Storage whose every put fails with a fixed message.
    struct FailingStorage(&'static str);

    #[async_trait]
    impl Storage for FailingStorage {
        async fn put(&self, _key: &str, _content_type: &str, _data: Bytes) -> StorageResult<()> {
            Err(StorageError::UploadFailed(self.0.to_string()))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Memory
        }
    }

    #[tokio::test]
    async fn success_returns_url_name_and_timestamp() {
        let storage = MemoryStorage::new();
        let receipt = upload(
            &complete_settings(),
            &storage,
            "images/1.png",
            "1.png",
            "image/png",
            Bytes::from_static(b"png"),
        )
        .await
        .unwrap();

        assert_eq!(receipt.url, "https://notes.s3.example.com/images/1.png");
        assert_eq!(receipt.file_name, "1.png");
        assert!(storage.has_object("images/1.png"));
    }

    #[tokio::test]
    async fn incomplete_settings_list_exactly_the_empty_fields() {
        let settings = Settings {
            access_key_id: String::new(),
            bucket_name: String::new(),
            ..complete_settings()
        };
        let storage = MemoryStorage::new();

        let err = upload(
            &settings,
            &storage,
            "images/1.png",
            "1.png",
            "image/png",
            Bytes::from_static(b"png"),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "missing required settings: accessKeyId, bucketName"
        );
        // No network call was attempted
        assert_eq!(storage.object_count(), 0);
    }

    #[tokio::test]
    async fn send_failure_signature_is_classified_as_access_policy() {
        let storage =
            FailingStorage("Generic S3 error: error sending request for url (https://x/)");
        let err = upload(
            &complete_settings(),
            &storage,
            "k",
            "k",
            "image/png",
            Bytes::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UploadError::AccessPolicy { .. }));
        assert!(err.to_string().contains("CORS"));
    }

    #[tokio::test]
    async fn other_failures_keep_the_original_cause_text() {
        let storage = FailingStorage("response was 403 Forbidden");
        let err = upload(
            &complete_settings(),
            &storage,
            "k",
            "k",
            "image/png",
            Bytes::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UploadError::Transport(_)));
        assert_eq!(err.to_string(), "upload failed: response was 403 Forbidden");
    }
}

//! Shared fixtures: settings, files, and storage factories.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use notedrop_core::{PendingFile, Settings};
use notedrop_storage::{
    MemoryStorage, Storage, StorageBackend, StorageError, StorageResult,
};

use crate::plugin::StorageFactory;

/// Settings with every required connection field filled in.
pub fn complete_settings() -> Settings {
    Settings {
        endpoint: "https://s3.example.com".to_string(),
        access_key_id: "AKIA".to_string(),
        secret_access_key: "shh".to_string(),
        bucket_name: "notes".to_string(),
        ..Settings::default()
    }
}

pub fn png_file(name: &str) -> PendingFile {
    PendingFile::new(name, "image/png", Bytes::from_static(b"\x89PNG\r\n"))
}

pub fn jpeg_file(name: &str) -> PendingFile {
    PendingFile::new(name, "image/jpeg", Bytes::from_static(b"\xff\xd8\xff"))
}

pub fn pdf_file(name: &str) -> PendingFile {
    PendingFile::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.4"))
}

/// Factory that hands every batch the same in-memory storage, so tests
/// can inspect what was stored.
pub fn memory_factory(storage: MemoryStorage) -> StorageFactory {
    Arc::new(move |_settings: &Settings| {
        Ok(Arc::new(storage.clone()) as Arc<dyn Storage>)
    })
}

/// Storage whose every put fails with a fixed message.
pub struct FailingStorage {
    message: String,
}

impl FailingStorage {
    pub fn new(message: impl Into<String>) -> Self {
        FailingStorage {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put(&self, _key: &str, _content_type: &str, _data: Bytes) -> StorageResult<()> {
        Err(StorageError::UploadFailed(self.message.clone()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Factory producing a storage that always fails with `message`.
pub fn failing_factory(message: &str) -> StorageFactory {
    let message = message.to_string();
    Arc::new(move |_settings: &Settings| {
        Ok(Arc::new(FailingStorage::new(message.clone())) as Arc<dyn Storage>)
    })
}

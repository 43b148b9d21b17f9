//! In-memory Storage implementation for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{Storage, StorageBackend, StorageError, StorageResult};

/// Storage that keeps objects in a map. Used by unit and pipeline tests so
/// no network is involved.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, (String, Bytes)>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects (for test assertions).
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Check if an object exists under `key`.
    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Stored bytes for `key` (for test assertions).
    pub fn object_data(&self, key: &str) -> Option<Bytes> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, data)| data.clone())
    }

    /// Stored content type for `key` (for test assertions).
    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(content_type, _)| content_type.clone())
    }

    /// All stored keys, unordered.
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.objects
            .lock()
            .map_err(|_| StorageError::UploadFailed("storage mutex poisoned".to_string()))?
            .insert(key.to_string(), (content_type.to_string(), data));
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_stores_bytes_and_content_type() {
        let storage = MemoryStorage::new();
        storage
            .put("images/1.png", "image/png", Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert!(storage.has_object("images/1.png"));
        assert_eq!(storage.object_data("images/1.png").unwrap(), "png");
        assert_eq!(
            storage.content_type_of("images/1.png").unwrap(),
            "image/png"
        );
    }
}

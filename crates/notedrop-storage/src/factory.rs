//! Storage construction from a settings snapshot.

use std::sync::Arc;

use notedrop_core::Settings;

use crate::s3::S3Storage;
use crate::traits::{Storage, StorageResult};

/// Create the storage backend for a batch.
///
/// One client per batch keeps the settings snapshot and the client's view
/// of it in lockstep; the builder is cheap enough that caching buys
/// nothing here.
pub fn create_storage(settings: &Settings) -> StorageResult<Arc<dyn Storage>> {
    let storage = S3Storage::from_settings(settings)?;
    Ok(Arc::new(storage))
}

//! Notedrop Storage Library
//!
//! This crate provides the storage abstraction and implementations for
//! notedrop: the `Storage` trait, the S3-compatible backend, an in-memory
//! backend for tests, key/URL construction, and the uploader that enforces
//! the settings contract.
//!
//! # Key format
//!
//! Object keys are `{prefix}{year?/}{timestamp}.{ext}`. Key construction is
//! centralized in the `keys` module so every caller produces the same
//! layout; see [`keys::object_key`] and [`keys::unique_file_name`].

pub mod factory;
pub mod keys;
pub mod memory;
pub mod s3;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::NameSequence;
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult};
pub use uploader::{upload, UploadReceipt};

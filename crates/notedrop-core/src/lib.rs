//! Notedrop Core Library
//!
//! This crate provides the domain models, settings, error types, and host
//! capability traits shared across all notedrop components.

pub mod error;
pub mod host;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use error::UploadError;
pub use host::{EditorSurface, NoOpNotifier, Notice, NoticeKind, Notifier, Position};
pub use models::{FileContents, PendingFile, UploadOutcome, UploadedImage};
pub use settings::{Settings, SettingsStore};

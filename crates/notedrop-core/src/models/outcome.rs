//! Per-file upload outcomes.

use chrono::{DateTime, Utc};

use crate::error::UploadError;

/// A successfully stored image.
#[derive(Clone, Debug)]
pub struct UploadedImage {
    /// Key the object was stored under.
    pub key: String,
    /// Public URL referencing the stored object.
    pub url: String,
    /// The human-readable name the file arrived with. Never part of the
    /// stored key; only used for link text.
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of one upload attempt. Created per file, used once to build
/// either a markdown link or a failure notice, then discarded.
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(UploadedImage),
    Failed {
        original_name: String,
        error: UploadError,
    },
}

impl UploadOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded(_))
    }

    pub fn original_name(&self) -> &str {
        match self {
            UploadOutcome::Uploaded(image) => &image.original_name,
            UploadOutcome::Failed { original_name, .. } => original_name,
        }
    }
}

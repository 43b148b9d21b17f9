//! Error types for the upload pipeline.
//!
//! Every fallible boundary returns one of these variants instead of throwing
//! past it; the pipeline turns them into user-facing notices and never lets
//! one file's failure abort its siblings.

use thiserror::Error;

/// Failure of a single upload attempt.
#[derive(Debug, Error)]
pub enum UploadError {
    /// One or more required connection settings are empty. The message
    /// names every missing field so the user can fix them in one pass.
    #[error("missing required settings: {}", .0.join(", "))]
    ConfigIncomplete(Vec<String>),

    /// The request never completed at the transport layer in the way a
    /// cross-origin policy rejection presents. Best-effort classification;
    /// see [`UploadError::Transport`] for everything else.
    #[error(
        "upload failed: the request could not be sent, which usually means the \
         bucket's cross-origin (CORS) policy does not allow PUT from this app. \
         Add this app's origin to the bucket's allowed origins. (cause: {cause})"
    )]
    AccessPolicy { cause: String },

    /// Any other transport or store-side failure.
    #[error("upload failed: {0}")]
    Transport(String),

    /// The file's bytes could not be obtained from the platform.
    #[error("could not read file contents: {0}")]
    LocalRead(String),

    /// The active file's folder is not in the enabled-folder list. Raised
    /// before any network call.
    #[error("uploads are not enabled for this folder: {0}")]
    FolderDisabled(String),
}

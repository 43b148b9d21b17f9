//! Data models for the upload pipeline.
//!
//! Each sub-module represents one stage of a file's short life: captured
//! from a gesture, then reported as an outcome.

mod file;
mod outcome;

pub use file::{FileContents, PendingFile};
pub use outcome::{UploadOutcome, UploadedImage};

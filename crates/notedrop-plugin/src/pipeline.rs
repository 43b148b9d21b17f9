//! Upload pipeline: guard → dispatch → partition → insert → notify.
//!
//! This is the canonical flow for a captured batch of image files. It is a
//! plain async function over a settings snapshot, file descriptors, and the
//! host capability traits, so it can be driven end to end without any host
//! present. One file's failure never aborts its siblings; every failure
//! surfaces as a notice naming the file.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use notedrop_core::{
    EditorSurface, FileContents, Notice, Notifier, PendingFile, Settings, UploadError,
    UploadOutcome, UploadedImage,
};
use notedrop_storage::{keys, uploader, NameSequence, Storage};

use crate::markdown;

/// Folder and settings preconditions, evaluated before any network call.
///
/// Folder gating comes first: with a non-empty allow-list, the active
/// file's path decides whether uploads fire at all. Settings completeness
/// is checked next.
pub fn check_preconditions(
    settings: &Settings,
    editor: &dyn EditorSurface,
) -> Result<(), UploadError> {
    if let Some(path) = editor.active_file_path() {
        if !settings.folder_allows(&path) {
            return Err(UploadError::FolderDisabled(path));
        }
    }

    let missing = settings.missing_fields();
    if !missing.is_empty() {
        return Err(UploadError::ConfigIncomplete(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    Ok(())
}

/// Run one captured batch to completion and return the per-file outcomes
/// in input order.
///
/// The settings snapshot taken at dispatch time is used for the whole
/// batch; a setting changed mid-batch does not affect in-flight uploads.
pub async fn process_batch(
    settings: Arc<Settings>,
    files: Vec<PendingFile>,
    storage: Arc<dyn Storage>,
    names: &NameSequence,
    editor: &dyn EditorSurface,
    notifier: &dyn Notifier,
) -> Vec<UploadOutcome> {
    // Filter happened at capture; an empty batch is a silent no-op.
    if files.is_empty() {
        return Vec::new();
    }

    // Guard
    if let Err(reason) = check_preconditions(&settings, editor) {
        tracing::warn!(error = %reason, "upload batch abandoned before dispatch");
        notifier.notify(Notice::sticky(reason.to_string()));
        return Vec::new();
    }

    // Dispatch: unordered completion, joined before insertion. join_all
    // hands the results back in input order regardless.
    let uploads = files.into_iter().map(|file| {
        let settings = settings.clone();
        let storage = storage.clone();
        async move { upload_one(&settings, storage.as_ref(), names, file).await }
    });
    let outcomes = futures::future::join_all(uploads).await;

    // Partition
    let succeeded = outcomes.iter().filter(|o| o.is_uploaded()).count();
    let failed = outcomes.len() - succeeded;
    tracing::info!(succeeded, failed, "upload batch finished");

    // Insert: successes in fixed input order, each link landing at the
    // previous insertion's end so simultaneous uploads never stack.
    let mut at = editor.cursor();
    for outcome in &outcomes {
        if let UploadOutcome::Uploaded(image) = outcome {
            let link = markdown::image_link(&image.original_name, &image.url);
            editor.replace_range(&link, at);
            at = at.advanced_by(&link);
        }
    }

    // Notify
    for outcome in &outcomes {
        match outcome {
            UploadOutcome::Uploaded(image) => {
                notifier.notify(Notice::transient(format!(
                    "Uploaded {}",
                    image.original_name
                )));
            }
            UploadOutcome::Failed {
                original_name,
                error,
            } => {
                notifier.notify(Notice::sticky(format!("{}: {}", original_name, error)));
            }
        }
    }

    outcomes
}

/// One file: unique name, object key, single PUT. Each invocation owns its
/// bytes and an immutable settings snapshot; nothing is shared between
/// concurrent siblings.
async fn upload_one(
    settings: &Settings,
    storage: &dyn Storage,
    names: &NameSequence,
    file: PendingFile,
) -> UploadOutcome {
    let bytes = match file.contents {
        FileContents::Bytes(bytes) => bytes,
        FileContents::Unavailable(reason) => {
            return UploadOutcome::Failed {
                original_name: file.name,
                error: UploadError::LocalRead(reason),
            };
        }
    };

    let stamp = names.stamp();
    let file_name = keys::unique_file_name(&file.name, stamp);
    // Year subdirectory and generated name come from the same instant.
    let at = DateTime::from_timestamp_millis(stamp).unwrap_or_else(Utc::now);
    let key = keys::object_key(
        &settings.path_prefix,
        &file_name,
        settings.use_year_subdirectory,
        at,
    );

    match uploader::upload(
        settings,
        storage,
        &key,
        &file_name,
        &file.content_type,
        bytes,
    )
    .await
    {
        Ok(receipt) => UploadOutcome::Uploaded(UploadedImage {
            key,
            url: receipt.url,
            original_name: file.name,
            uploaded_at: receipt.uploaded_at,
        }),
        Err(error) => UploadOutcome::Failed {
            original_name: file.name,
            error,
        },
    }
}

//! Gesture handlers: the capture-side gating ladder.
//!
//! A handler decides the event's disposition and, when everything is
//! green, runs the pipeline. Errors never propagate past the dispatch
//! boundary: whatever goes wrong becomes a notice, and the host keeps
//! running.

use std::sync::Arc;

use async_trait::async_trait;

use notedrop_core::{EditorSurface, Notice, Notifier};

use crate::events::{EventDisposition, GestureEvent};
use crate::pipeline;
use crate::plugin::PipelineDeps;

/// Host surfaces available to a dispatched event. The editor is absent
/// when no editable document view is active.
#[derive(Clone)]
pub struct HostContext {
    pub editor: Option<Arc<dyn EditorSurface>>,
    pub notifier: Arc<dyn Notifier>,
}

impl HostContext {
    pub fn new(editor: Option<Arc<dyn EditorSurface>>, notifier: Arc<dyn Notifier>) -> Self {
        HostContext { editor, notifier }
    }
}

/// Trait that all gesture handlers must implement.
#[async_trait]
pub trait GestureHandler: Send + Sync {
    async fn handle(&self, event: &GestureEvent, host: &HostContext) -> EventDisposition;
}

/// Drop gesture: upload image files, leave everything else alone.
pub struct DropHandler {
    deps: Arc<PipelineDeps>,
}

impl DropHandler {
    pub fn new(deps: Arc<PipelineDeps>) -> Self {
        DropHandler { deps }
    }
}

#[async_trait]
impl GestureHandler for DropHandler {
    async fn handle(&self, event: &GestureEvent, host: &HostContext) -> EventDisposition {
        handle_upload_gesture(&self.deps, event, host).await
    }
}

/// Paste gesture: same gating as drop, over clipboard file items.
pub struct PasteHandler {
    deps: Arc<PipelineDeps>,
}

impl PasteHandler {
    pub fn new(deps: Arc<PipelineDeps>) -> Self {
        PasteHandler { deps }
    }
}

#[async_trait]
impl GestureHandler for PasteHandler {
    async fn handle(&self, event: &GestureEvent, host: &HostContext) -> EventDisposition {
        handle_upload_gesture(&self.deps, event, host).await
    }
}

/// Dragover: unconditionally suppressed so the drop zone accepts the drag.
pub struct DragOverHandler;

#[async_trait]
impl GestureHandler for DragOverHandler {
    async fn handle(&self, _event: &GestureEvent, _host: &HostContext) -> EventDisposition {
        EventDisposition::Consumed
    }
}

/// The shared ladder: images present? editable view active? folder and
/// settings preconditions pass? Only then is the event consumed and the
/// batch dispatched. A failed precondition leaves the event to the host's
/// default handling and tells the user why nothing was uploaded.
async fn handle_upload_gesture(
    deps: &PipelineDeps,
    event: &GestureEvent,
    host: &HostContext,
) -> EventDisposition {
    let files = event.image_files();
    if files.is_empty() {
        return EventDisposition::PassThrough;
    }

    let Some(editor) = host.editor.as_ref() else {
        return EventDisposition::PassThrough;
    };

    let settings = deps.settings.snapshot().await;

    if let Err(reason) = pipeline::check_preconditions(&settings, editor.as_ref()) {
        tracing::warn!(gesture = ?event.gesture, error = %reason, "upload gesture abandoned");
        host.notifier.notify(Notice::sticky(reason.to_string()));
        return EventDisposition::PassThrough;
    }

    let storage = match (deps.storage_factory)(&settings) {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!(error = %err, "could not build storage backend");
            host.notifier
                .notify(Notice::sticky(format!("upload failed: {}", err)));
            return EventDisposition::PassThrough;
        }
    };

    pipeline::process_batch(
        settings,
        files,
        storage,
        &deps.names,
        editor.as_ref(),
        host.notifier.as_ref(),
    )
    .await;

    EventDisposition::Consumed
}

//! Plugin assembly: settings, name sequence, storage factory, handler
//! wiring.

use std::sync::Arc;

use anyhow::Context;

use notedrop_core::{Settings, SettingsStore};
use notedrop_storage::{create_storage, NameSequence, Storage, StorageResult};

use crate::events::Gesture;
use crate::handlers::{DragOverHandler, DropHandler, PasteHandler};
use crate::registry::{HandlerRegistry, HandlerToken};

/// Builds the storage backend for one batch from the settings snapshot the
/// batch dispatched with. Tests swap this out for an in-memory backend.
pub type StorageFactory = Arc<dyn Fn(&Settings) -> StorageResult<Arc<dyn Storage>> + Send + Sync>;

/// Everything a gesture handler needs, shared across the three handlers.
pub struct PipelineDeps {
    pub settings: Arc<SettingsStore>,
    pub names: Arc<NameSequence>,
    pub storage_factory: StorageFactory,
}

/// Tokens for the three registered handlers, returned by `attach` and
/// consumed by `detach`.
#[derive(Clone, Copy, Debug)]
pub struct AttachedHandlers {
    pub drop: HandlerToken,
    pub drag_over: HandlerToken,
    pub paste: HandlerToken,
}

/// The plugin: owns the settings snapshot store and the unique-name
/// sequence, and registers the gesture handlers with a host-driven
/// registry.
pub struct Notedrop {
    deps: Arc<PipelineDeps>,
}

impl Notedrop {
    /// Plugin with the default S3 storage factory.
    pub fn new(settings: SettingsStore) -> Self {
        Self::with_storage_factory(settings, Arc::new(create_storage))
    }

    /// Plugin from whatever JSON the host last persisted.
    pub fn from_stored(stored: Option<serde_json::Value>) -> anyhow::Result<Self> {
        let settings =
            SettingsStore::from_stored(stored).context("failed to parse stored settings")?;
        Ok(Self::new(settings))
    }

    /// Plugin with a caller-supplied storage factory.
    pub fn with_storage_factory(settings: SettingsStore, storage_factory: StorageFactory) -> Self {
        Notedrop {
            deps: Arc::new(PipelineDeps {
                settings: Arc::new(settings),
                names: Arc::new(NameSequence::new()),
                storage_factory,
            }),
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.deps.settings
    }

    /// Replace the settings snapshot wholesale. In-flight batches keep the
    /// snapshot they dispatched with. Returns the new snapshot so the host
    /// can persist it.
    pub async fn update_settings(&self, settings: Settings) -> Arc<Settings> {
        self.deps.settings.replace(settings).await
    }

    /// Register the drop, dragover, and paste handlers.
    pub async fn attach(&self, registry: &HandlerRegistry) -> AttachedHandlers {
        let drop = registry
            .register(Gesture::Drop, Arc::new(DropHandler::new(self.deps.clone())))
            .await;
        let drag_over = registry
            .register(Gesture::DragOver, Arc::new(DragOverHandler))
            .await;
        let paste = registry
            .register(
                Gesture::Paste,
                Arc::new(PasteHandler::new(self.deps.clone())),
            )
            .await;

        tracing::debug!("notedrop handlers attached");
        AttachedHandlers {
            drop,
            drag_over,
            paste,
        }
    }

    /// Deregister handlers previously attached (plugin unload).
    pub async fn detach(&self, registry: &HandlerRegistry, attached: AttachedHandlers) {
        registry.deregister(attached.drop).await;
        registry.deregister(attached.drag_over).await;
        registry.deregister(attached.paste).await;
        tracing::debug!("notedrop handlers detached");
    }
}

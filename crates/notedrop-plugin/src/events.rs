//! Host-agnostic gesture events.
//!
//! The host adapter translates its platform's drop/paste/dragover events
//! into these descriptors before dispatching them; the platform read of
//! each file's bytes has already happened by then.

use notedrop_core::PendingFile;

/// The user gesture a captured event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Drop,
    DragOver,
    Paste,
}

/// One entry of a gesture's payload.
#[derive(Clone, Debug)]
pub enum GestureItem {
    /// A file-kind item with its captured contents.
    File(PendingFile),
    /// A non-file item (plain text, HTML fragment, ...); never uploaded.
    Text,
}

/// A captured gesture and its payload, in platform order.
#[derive(Clone, Debug)]
pub struct GestureEvent {
    pub gesture: Gesture,
    pub items: Vec<GestureItem>,
}

impl GestureEvent {
    pub fn new(gesture: Gesture, items: Vec<GestureItem>) -> Self {
        GestureEvent { gesture, items }
    }

    /// The file items whose declared type begins with `image/`, input
    /// order preserved. Everything else is left for the host's default
    /// handling.
    pub fn image_files(&self) -> Vec<PendingFile> {
        self.items
            .iter()
            .filter_map(|item| match item {
                GestureItem::File(file) if file.is_image() => Some(file.clone()),
                _ => None,
            })
            .collect()
    }
}

/// What the host dispatcher should do with the platform event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    /// Suppress the default action and further propagation.
    Consumed,
    /// Leave the event untouched; the host's default behavior proceeds.
    PassThrough,
}

//! Handler registry driven by the host's event dispatcher.
//!
//! The host adapter translates each platform event into a `GestureEvent`
//! and calls `dispatch`; the returned disposition tells it whether to
//! suppress the platform event's default action. Registration hands back a
//! token for later deregistration (plugin unload).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::events::{EventDisposition, Gesture, GestureEvent};
use crate::handlers::{GestureHandler, HostContext};

/// Deregistration handle returned by `register`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerToken(u64);

/// Registry for gesture handlers.
///
/// Thread-safe and async-compatible using tokio's RwLock. Handlers run in
/// registration order; the first one that consumes the event wins, which
/// gives capture-phase semantics without a DOM.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<Gesture, Vec<(HandlerToken, Arc<dyn GestureHandler>)>>>>,
    next_token: Arc<AtomicU64>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            next_token: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a handler for a gesture. Returns the token that
    /// deregisters it.
    pub async fn register(
        &self,
        gesture: Gesture,
        handler: Arc<dyn GestureHandler>,
    ) -> HandlerToken {
        let token = HandlerToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .await
            .entry(gesture)
            .or_default()
            .push((token, handler));
        token
    }

    /// Remove a previously registered handler. Returns whether the token
    /// was still live.
    pub async fn deregister(&self, token: HandlerToken) -> bool {
        let mut handlers = self.handlers.write().await;
        for list in handlers.values_mut() {
            let before = list.len();
            list.retain(|(t, _)| *t != token);
            if list.len() != before {
                return true;
            }
        }
        false
    }

    /// Dispatch one event through the handlers registered for its gesture.
    pub async fn dispatch(&self, event: GestureEvent, host: &HostContext) -> EventDisposition {
        // Snapshot the handler list so a slow upload never holds the lock.
        let handlers: Vec<Arc<dyn GestureHandler>> = {
            let map = self.handlers.read().await;
            match map.get(&event.gesture) {
                Some(list) => list.iter().map(|(_, h)| h.clone()).collect(),
                None => Vec::new(),
            }
        };

        for handler in handlers {
            if handler.handle(&event, host).await == EventDisposition::Consumed {
                return EventDisposition::Consumed;
            }
        }
        EventDisposition::PassThrough
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notedrop_core::NoOpNotifier;

    /// Handler with a fixed disposition.
    struct FixedHandler(EventDisposition);

    #[async_trait::async_trait]
    impl GestureHandler for FixedHandler {
        async fn handle(&self, _event: &GestureEvent, _host: &HostContext) -> EventDisposition {
            self.0
        }
    }

    fn host() -> HostContext {
        HostContext::new(None, Arc::new(NoOpNotifier))
    }

    fn drop_event() -> GestureEvent {
        GestureEvent::new(Gesture::Drop, Vec::new())
    }

    #[tokio::test]
    async fn dispatch_without_handlers_passes_through() {
        let registry = HandlerRegistry::new();
        let disposition = registry.dispatch(drop_event(), &host()).await;
        assert_eq!(disposition, EventDisposition::PassThrough);
    }

    #[tokio::test]
    async fn first_consuming_handler_wins() {
        let registry = HandlerRegistry::new();
        registry
            .register(
                Gesture::Drop,
                Arc::new(FixedHandler(EventDisposition::PassThrough)),
            )
            .await;
        registry
            .register(
                Gesture::Drop,
                Arc::new(FixedHandler(EventDisposition::Consumed)),
            )
            .await;

        let disposition = registry.dispatch(drop_event(), &host()).await;
        assert_eq!(disposition, EventDisposition::Consumed);
    }

    #[tokio::test]
    async fn handlers_only_see_their_own_gesture() {
        let registry = HandlerRegistry::new();
        registry
            .register(
                Gesture::Paste,
                Arc::new(FixedHandler(EventDisposition::Consumed)),
            )
            .await;

        let disposition = registry.dispatch(drop_event(), &host()).await;
        assert_eq!(disposition, EventDisposition::PassThrough);
    }

    #[tokio::test]
    async fn deregistered_handlers_no_longer_fire() {
        let registry = HandlerRegistry::new();
        let token = registry
            .register(
                Gesture::Drop,
                Arc::new(FixedHandler(EventDisposition::Consumed)),
            )
            .await;

        assert!(registry.deregister(token).await);
        assert!(!registry.deregister(token).await);

        let disposition = registry.dispatch(drop_event(), &host()).await;
        assert_eq!(disposition, EventDisposition::PassThrough);
    }

    #[tokio::test]
    async fn tokens_are_unique_across_gestures() {
        let registry = HandlerRegistry::new();
        let a = registry
            .register(
                Gesture::Drop,
                Arc::new(FixedHandler(EventDisposition::Consumed)),
            )
            .await;
        let b = registry
            .register(
                Gesture::Paste,
                Arc::new(FixedHandler(EventDisposition::Consumed)),
            )
            .await;
        assert_ne!(a, b);
    }
}

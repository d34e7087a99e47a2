use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::trace;

use event_builders::{ContextEntry, TrackedEvent};

/// Fire-and-forget transport capability. `track` must never block and
/// never raise into the caller: delivery is best effort, retry semantics
/// belong to the implementation behind it.
pub trait EventSink: Send + Sync {
    fn track(&self, event: TrackedEvent);
}

/// Context-provider collaborator, queried once per approved event just
/// before dispatch.
pub trait ContextProvider: Send + Sync {
    fn current_contexts(&self) -> Vec<ContextEntry>;
}

/// Fixed context set, the common case of page-level metadata declared at
/// instrumentation setup.
#[derive(Clone, Debug, Default)]
pub struct StaticContexts(pub Vec<ContextEntry>);

impl ContextProvider for StaticContexts {
    fn current_contexts(&self) -> Vec<ContextEntry> {
        self.0.clone()
    }
}

/// Broadcast-channel sink: hands events to whatever downstream pipeline is
/// subscribed. A lagging or absent subscriber drops events silently; the
/// core is never affected.
pub struct BroadcastSink {
    sender: broadcast::Sender<TrackedEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackedEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn track(&self, event: TrackedEvent) {
        if self.sender.send(event).is_err() {
            trace!("no subscriber on sink, event dropped");
        }
    }
}

/// In-memory sink suitable for unit tests and early integration: collects
/// every event in dispatch order.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<TrackedEvent>>,
}

impl CollectingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for CollectingSink {
    fn track(&self, event: TrackedEvent) {
        self.events.lock().push(event);
    }
}

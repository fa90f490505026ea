//! Listener registry and event fan-out.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::ListenerId;

use super::info::{QuestChannel, QuestEvent, QuestEventInfo};

type Listener = Box<dyn FnMut(&QuestEventInfo)>;

/// Fan-out side of the notification surface.
///
/// Presentation code (dialogue triggers, UI, save hooks) registers a
/// listener per channel; the game loop pumps each [`QuestEvent`]
/// returned by a manager transition through [`dispatch`](Self::dispatch).
/// Since the manager produces each event exactly once, each listener
/// sees each transition exactly once.
///
/// Dispatch is driven by the caller rather than from inside the
/// manager, so a listener reaction may re-enter the manager between
/// transitions without aliasing it.
///
/// ## Example
///
/// ```
/// use quest_engine::events::{EventHub, QuestChannel};
///
/// let mut hub = EventHub::new();
/// let id = hub.subscribe(QuestChannel::StepComplete, |info| {
///     println!("step {} completed", info.step);
/// });
/// hub.unsubscribe(id);
/// ```
#[derive(Default)]
pub struct EventHub {
    listeners: FxHashMap<QuestChannel, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener on a channel. Returns the handle used to
    /// remove it again.
    pub fn subscribe<F>(&mut self, channel: QuestChannel, listener: F) -> ListenerId
    where
        F: FnMut(&QuestEventInfo) + 'static,
    {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(channel)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(pos) = listeners.iter().position(|(lid, _)| *lid == id) {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of registered listeners across all channels.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Deliver one event to every listener on its channel, in
    /// registration order.
    pub fn dispatch(&mut self, event: &QuestEvent) {
        let channel = event.channel();
        let info = event.info();
        debug!(?channel, step = %info.step, "dispatching quest event");

        if let Some(listeners) = self.listeners.get_mut(&channel) {
            for (_, listener) in listeners.iter_mut() {
                listener(info);
            }
        }
    }

    /// Deliver a batch of events in order.
    pub fn dispatch_all(&mut self, events: &[QuestEvent]) {
        for event in events {
            self.dispatch(event);
        }
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

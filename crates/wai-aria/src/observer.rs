//! Event Bus
//!
//! Minimal synchronous pub/sub keyed by event name. Listeners fire in
//! registration order; emitting an event nobody listens to is a no-op.

use std::collections::HashMap;
use std::fmt;

/// Listener handle, used for deregistration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

struct Slot<E> {
    id: ListenerId,
    callback: Callback<E>,
}

/// Named-event dispatcher carrying payloads of type `E`
pub struct EventBus<E> {
    channels: HashMap<String, Vec<Slot<E>>>,
    next_id: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a listener for `event`; returns its handle
    pub fn add_listener(&mut self, event: &str, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.channels.entry(event.to_string()).or_default().push(Slot {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Deregister a listener; returns whether it was registered
    pub fn remove_listener(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(slots) = self.channels.get_mut(event) else {
            return false;
        };
        let before = slots.len();
        slots.retain(|s| s.id != id);
        slots.len() != before
    }

    /// Synchronously invoke every listener registered for `event`
    pub fn emit(&mut self, event: &str, detail: &E) {
        let Some(slots) = self.channels.get_mut(event) else {
            return;
        };
        for slot in slots.iter_mut() {
            (slot.callback)(detail);
        }
    }

    /// Number of listeners currently registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.channels.get(event).map_or(0, |s| s.len())
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, slots) in &self.channels {
            map.entry(event, &slots.len());
        }
        map.finish()
    }
}

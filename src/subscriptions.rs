//! Change notification for subscribed views.
//!
//! Every repository or registry mutation broadcasts a `MutationKind` so the
//! active view projections re-render (push-based, not polling). Views
//! register a callback and receive the kind of change synchronously, in the
//! order mutations were issued.

use std::sync::{Arc, Mutex};

/// Categories of mutations that views may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// A task was created, updated, or deleted.
    TaskChanged,
    /// A board definition was edited or the current board selection changed.
    BoardChanged,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(MutationKind) + Send + Sync>;

/// Fan-out of mutation notifications to subscribed views.
///
/// Thread-safe: uses an internal `Mutex` so it can be shared without
/// requiring `&mut self`. Callbacks run synchronously on the mutating
/// thread; they must be cheap (a re-render trigger, not the render itself).
/// The listener list is snapshotted before callbacks run, so a callback may
/// subscribe or unsubscribe on the same notifier; listeners added during a
/// broadcast see the next one.
pub struct ChangeNotifier {
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: Mutex<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    /// Register a listener. Returns a handle for `unsubscribe`.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(MutationKind) + Send + Sync + 'static,
    {
        let mut next = self.next_id.lock().unwrap();
        let id = SubscriptionId(*next);
        *next += 1;
        self.listeners
            .lock()
            .unwrap()
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `true` if it was present.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Check if any listeners are registered.
    pub fn has_subscribers(&self) -> bool {
        !self.listeners.lock().unwrap().is_empty()
    }

    /// Notify all listeners of a mutation. The lock is released before any
    /// callback runs.
    pub fn broadcast(&self, kind: MutationKind) {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(kind);
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

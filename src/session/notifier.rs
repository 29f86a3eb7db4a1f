//! Session Change Notifier
//! Mission: Let independently-owned components react to session changes

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_id: AtomicU64,
}

/// Process-local publish/subscribe signal carrying no payload.
///
/// Observers re-read the session store themselves instead of receiving
/// pushed data, so a callback never acts on a stale snapshot when writes
/// overlap. Dispatch is synchronous, in registration order, on the thread
/// that performed the change.
#[derive(Default)]
pub struct ChangeNotifier {
    registry: Arc<Registry>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. The returned guard keeps it registered;
    /// dropping the guard (or calling `unsubscribe`) removes it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .subscribers
            .lock()
            .push((id, Arc::new(callback)));
        Subscription {
            registry: Arc::clone(&self.registry),
            id,
        }
    }

    /// Invoke every current subscriber once, in registration order.
    ///
    /// Callbacks run outside the registry lock, so they may re-read the
    /// store or subscribe further callbacks. Registry changes made during a
    /// dispatch take effect from the next dispatch.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .registry
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.lock().len()
    }
}

/// Keeps one subscriber registered. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Arc<Registry>,
    id: u64,
}

impl Subscription {
    /// Remove the callback. Later notifications no longer reach it.
    pub fn unsubscribe(self) {
        // Drop does the removal.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry
            .subscribers
            .lock()
            .retain(|(id, _)| *id != self.id);
    }
}

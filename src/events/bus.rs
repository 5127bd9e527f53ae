//! Topic-based publish/subscribe bus
//!
//! Delivery is synchronous: `emit` runs every callback registered on the
//! topic, in registration order, before returning. Each callback runs under
//! a panic guard so one module's bug never silences another module's
//! notifications.

use crate::core::isolation::run_isolated;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked with the payload of an emitted event
pub type EventCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Identifies one registration on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Listener {
    id: SubscriptionId,
    callback: EventCallback,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
}

impl BusInner {
    fn listeners(&self) -> MutexGuard<'_, HashMap<String, Vec<Listener>>> {
        // Callbacks never run while the lock is held, so a poisoned map is intact
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_subscription_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, topic: &str, id: SubscriptionId, callback: EventCallback) {
        self.listeners()
            .entry(topic.to_string())
            .or_default()
            .push(Listener { id, callback });
    }

    fn remove(&self, topic: &str, id: SubscriptionId) {
        let mut listeners = self.listeners();
        if let Some(topic_listeners) = listeners.get_mut(topic) {
            topic_listeners.retain(|listener| listener.id != id);
            if topic_listeners.is_empty() {
                listeners.remove(topic);
            }
        }
    }

    fn contains(&self, topic: &str, id: SubscriptionId) -> bool {
        self.listeners()
            .get(topic)
            .is_some_and(|topic_listeners| topic_listeners.iter().any(|l| l.id == id))
    }
}

/// Shared in-process event bus
///
/// Cloning is cheap and every clone talks to the same set of listeners.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.inner.listeners();
        let mut topics: Vec<(&String, usize)> =
            listeners.iter().map(|(topic, l)| (topic, l.len())).collect();
        topics.sort();
        f.debug_struct("EventBus").field("topics", &topics).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `topic`
    ///
    /// The returned handle removes exactly this registration.
    pub fn on<F>(&self, topic: impl AsRef<str>, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let topic = topic.as_ref();
        let id = self.inner.next_subscription_id();
        self.inner.insert(topic, id, Arc::new(callback));
        log::trace!("Subscribed {:?} to \"{}\"", id, topic);
        self.subscription(topic, id)
    }

    /// Register `callback` to run on the next emit of `topic` only
    ///
    /// The registration is removed before the callback body runs.
    pub fn once<F>(&self, topic: impl AsRef<str>, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let topic = topic.as_ref();
        let id = self.inner.next_subscription_id();
        let fired = AtomicBool::new(false);
        let bus = Arc::downgrade(&self.inner);
        let owned_topic = topic.to_string();

        let wrapper = move |payload: &Value| {
            if fired.swap(true, Ordering::AcqRel) {
                return;
            }
            if let Some(bus) = bus.upgrade() {
                bus.remove(&owned_topic, id);
            }
            callback(payload);
        };

        self.inner.insert(topic, id, Arc::new(wrapper));
        self.subscription(topic, id)
    }

    /// Remove a registration; no-op if it is not present
    pub fn off(&self, topic: impl AsRef<str>, id: SubscriptionId) {
        self.inner.remove(topic.as_ref(), id);
    }

    /// Deliver `payload` to every callback registered under `topic`
    ///
    /// Callbacks removed by an earlier callback during the same emit are
    /// skipped; callbacks added during the emit see only later events.
    /// Asynchronous work started by a callback is not awaited.
    pub fn emit(&self, topic: impl AsRef<str>, payload: Value) {
        let topic = topic.as_ref();
        let snapshot: Vec<(SubscriptionId, EventCallback)> = match self.inner.listeners().get(topic)
        {
            Some(topic_listeners) => topic_listeners
                .iter()
                .map(|listener| (listener.id, Arc::clone(&listener.callback)))
                .collect(),
            None => return,
        };

        for (id, callback) in snapshot {
            if !self.inner.contains(topic, id) {
                continue;
            }
            if let Err(message) = run_isolated(|| callback(&payload)) {
                log::error!("Error in event handler for \"{}\": {}", topic, message);
            }
        }
    }

    /// Remove all callbacks for `topic`, or for every topic when `None`
    pub fn clear(&self, topic: Option<&str>) {
        let mut listeners = self.inner.listeners();
        match topic {
            Some(topic) => {
                listeners.remove(topic);
            }
            None => listeners.clear(),
        }
    }

    /// Number of callbacks currently registered under `topic`
    pub fn subscriber_count(&self, topic: impl AsRef<str>) -> usize {
        self.inner
            .listeners()
            .get(topic.as_ref())
            .map_or(0, |topic_listeners| topic_listeners.len())
    }

    fn subscription(&self, topic: &str, id: SubscriptionId) -> Subscription {
        Subscription {
            topic: topic.to_string(),
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }
}

/// Handle to one registration on the bus
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    topic: String,
    id: SubscriptionId,
    bus: Weak<BusInner>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Remove the registration; repeated calls are no-ops
    pub fn unsubscribe(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(&self.topic, self.id);
        }
    }
}

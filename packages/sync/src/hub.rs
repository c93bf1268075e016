//! In-context broadcast hub
//!
//! Process-wide fan-out of [`RealtimeUpdate`] values within one execution
//! context. A hub is an explicit, constructible instance with its own
//! lifecycle — one per context, never an ambient singleton — so tests can
//! stand up several side by side.
//!
//! Delivery semantics:
//! - synchronous, on the publishing turn, in registration order
//! - a failing subscriber is logged and skipped; it never reaches the
//!   publisher or later subscribers
//! - the subscriber list may change during a publish without corrupting the
//!   in-flight delivery: membership is re-checked per callback, so a
//!   mid-publish unsubscribe suppresses the still-pending delivery and a
//!   mid-publish subscribe does not see the in-flight event
//! - every publish lands in a trailing FIFO history (capacity 50) and bumps
//!   a coarse, payload-free signal for consumers outside the direct
//!   subscription mechanism

use pagecraft_model::{RealtimeUpdate, UpdateAction, UpdateSubject};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;

/// How many recent updates late subscribers can still observe.
pub const HISTORY_CAPACITY: usize = 50;

/// Failure reported by a subscriber callback. Isolated per callback,
/// logged, and never fatal to the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SubscriberError(String);

impl SubscriberError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

type UpdateFn = dyn Fn(&RealtimeUpdate) -> Result<(), SubscriberError> + Send + Sync;
type SignalFn = dyn Fn() + Send + Sync;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Channel {
    Update,
    Signal,
}

struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, Arc<UpdateFn>)>,
    signal_listeners: Vec<(u64, Arc<SignalFn>)>,
    history: VecDeque<RealtimeUpdate>,
    generation: u64,
}

impl HubInner {
    fn contains(&self, channel: Channel, id: u64) -> bool {
        match channel {
            Channel::Update => self.subscribers.iter().any(|(sid, _)| *sid == id),
            Channel::Signal => self.signal_listeners.iter().any(|(sid, _)| *sid == id),
        }
    }

    fn remove(&mut self, channel: Channel, id: u64) {
        match channel {
            Channel::Update => self.subscribers.retain(|(sid, _)| *sid != id),
            Channel::Signal => self.signal_listeners.retain(|(sid, _)| *sid != id),
        }
    }
}

/// Capability returned by [`BroadcastHub::subscribe`]. Invoking
/// [`unsubscribe`](Subscription::unsubscribe) deregisters exactly that
/// callback; invoking it again has no further effect. Dropping the
/// subscription without calling it leaves the callback registered for the
/// hub's lifetime; dropping the hub makes the capability inert.
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    channel: Channel,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.hub.upgrade() {
            let mut inner = inner.lock().expect("hub lock");
            inner.remove(self.channel, self.id);
        }
    }
}

pub struct BroadcastHub {
    inner: Arc<Mutex<HubInner>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                next_id: 0,
                subscribers: Vec::new(),
                signal_listeners: Vec::new(),
                history: VecDeque::with_capacity(HISTORY_CAPACITY),
                generation: 0,
            })),
        }
    }

    /// Register a callback for every future publish.
    pub fn subscribe(
        &self,
        callback: impl Fn(&RealtimeUpdate) -> Result<(), SubscriberError> + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.inner.lock().expect("hub lock");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        Subscription {
            hub: Arc::downgrade(&self.inner),
            channel: Channel::Update,
            id,
        }
    }

    /// Register a coarse listener: told that *some* update happened, never
    /// handed the payload. This is the hook snapshot readers use to know
    /// when to re-read.
    pub fn subscribe_signal(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut inner = self.inner.lock().expect("hub lock");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.signal_listeners.push((id, Arc::new(callback)));
        Subscription {
            hub: Arc::downgrade(&self.inner),
            channel: Channel::Signal,
            id,
        }
    }

    /// Deliver `update` to every registered subscriber, append it to the
    /// trailing history, and fire the coarse signal.
    pub fn publish(&self, update: &RealtimeUpdate) {
        let (subscribers, signal_listeners) = {
            let mut inner = self.inner.lock().expect("hub lock");
            inner.history.push_back(update.clone());
            while inner.history.len() > HISTORY_CAPACITY {
                inner.history.pop_front();
            }
            inner.generation += 1;
            (inner.subscribers.clone(), inner.signal_listeners.clone())
        };

        // The lock is not held while callbacks run, so callbacks may freely
        // subscribe, unsubscribe, or publish again.
        for (id, callback) in subscribers {
            if !self.still_registered(Channel::Update, id) {
                continue;
            }
            if let Err(error) = callback(update) {
                tracing::warn!(subscriber = id, %error, "subscriber failed during publish");
            }
        }

        for (id, listener) in signal_listeners {
            if !self.still_registered(Channel::Signal, id) {
                continue;
            }
            listener();
        }
    }

    /// Publish a page update stamped with the current time.
    pub fn publish_page(&self, action: UpdateAction, payload: Value) {
        self.publish(&RealtimeUpdate::now(UpdateSubject::Page, action, payload));
    }

    /// Publish a menu update stamped with the current time.
    pub fn publish_menu(&self, action: UpdateAction, payload: Value) {
        self.publish(&RealtimeUpdate::now(UpdateSubject::Menu, action, payload));
    }

    /// Publish a combined page-and-menu update stamped with the current time.
    pub fn publish_page_menu(&self, action: UpdateAction, payload: Value) {
        self.publish(&RealtimeUpdate::now(UpdateSubject::PageMenu, action, payload));
    }

    /// The trailing history, oldest first.
    pub fn history(&self) -> Vec<RealtimeUpdate> {
        let inner = self.inner.lock().expect("hub lock");
        inner.history.iter().cloned().collect()
    }

    /// Monotonic publish counter; bumps once per publish.
    pub fn generation(&self) -> u64 {
        self.inner.lock().expect("hub lock").generation
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().expect("hub lock").subscribers.len()
    }

    fn still_registered(&self, channel: Channel, id: u64) -> bool {
        self.inner.lock().expect("hub lock").contains(channel, id)
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

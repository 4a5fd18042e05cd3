//! Traits for key-down event sources
//!
//! The trainer never talks to a keyboard hook directly. Anything that can
//! deliver key-down events implements `EventCapture`, which lets hosts plug in
//! their own hook and lets tests drive the trainer deterministically.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::combo::KeyId;

/// Callback invoked on every key-down with the key and its press time
pub type KeyDownCallback = Arc<dyn Fn(KeyId, Instant) + Send + Sync>;

/// Token identifying one subscription to an event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of key-down events
///
/// Implementations deliver events on their own thread, in timestamp order,
/// and stop delivering to a callback once it has been unsubscribed.
pub trait EventCapture: Send + Sync {
    /// Start delivering key-downs to `on_key_down`
    fn subscribe(&self, on_key_down: KeyDownCallback) -> SubscriptionHandle;

    /// Stop delivering to the subscription. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// In-process event source fed by the host
///
/// Forward presses from a platform hook with [`press`](Self::press), or
/// replay presses with explicit timestamps with [`press_at`](Self::press_at).
#[derive(Default)]
pub struct ManualCapture {
    subscribers: Mutex<Vec<(SubscriptionHandle, KeyDownCallback)>>,
    next_id: AtomicU64,
}

impl ManualCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a key-down stamped with the current instant
    pub fn press(&self, key: impl Into<KeyId>) {
        self.press_at(key, Instant::now());
    }

    /// Deliver a key-down with an explicit timestamp
    ///
    /// Callers must keep timestamps non-decreasing.
    pub fn press_at(&self, key: impl Into<KeyId>, timestamp: Instant) {
        let key = key.into();
        // Callbacks run without the subscriber lock held, so they may
        // unsubscribe themselves.
        let callbacks: Vec<KeyDownCallback> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        log::trace!("Delivering key-down '{}' to {} subscriber(s)", key, callbacks.len());
        for callback in callbacks {
            callback(key.clone(), timestamp);
        }
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl EventCapture for ManualCapture {
    fn subscribe(&self, on_key_down: KeyDownCallback) -> SubscriptionHandle {
        let handle = SubscriptionHandle::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().push((handle, on_key_down));
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.subscribers.lock().retain(|(h, _)| *h != handle);
    }
}

//! Most recent press time per key

use std::collections::HashMap;
use std::time::Instant;

use super::key::KeyId;

/// Maps each key to the instant it was last pressed
///
/// Entries survive across steps; the matcher only consults them relative
/// to a step's own start.
#[derive(Debug, Clone, Default)]
pub struct LastPressTimes {
    times: HashMap<KeyId, Instant>,
}

impl LastPressTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press, replacing any earlier one for the same key
    pub fn record(&mut self, key: KeyId, timestamp: Instant) {
        self.times.insert(key, timestamp);
    }

    /// Last press of `key`, if any
    pub fn get(&self, key: &KeyId) -> Option<Instant> {
        self.times.get(key).copied()
    }

    /// Last press of `key` if it happened at or after `since`
    pub fn pressed_since(&self, key: &KeyId, since: Instant) -> Option<Instant> {
        self.get(key).filter(|t| *t >= since)
    }

    /// Drop every entry with `timestamp >= cutoff`
    pub fn remove_from(&mut self, cutoff: Instant) {
        self.times.retain(|_, t| *t < cutoff);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn clear(&mut self) {
        self.times.clear();
    }
}

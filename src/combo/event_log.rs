//! Append-only record of captured key events

use std::time::Instant;

use super::key::KeyEvent;

/// Time-ordered log of key events
///
/// Events arrive in timestamp order, so every query is a binary search
/// for the first event at or after some instant.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<KeyEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured event
    pub fn append(&mut self, event: KeyEvent) {
        debug_assert!(
            self.events
                .last()
                .map_or(true, |last| last.timestamp <= event.timestamp),
            "key events must arrive in timestamp order"
        );
        self.events.push(event);
    }

    /// Remove every event with `timestamp >= cutoff`
    pub fn truncate_from(&mut self, cutoff: Instant) {
        let keep = self.first_index_at(cutoff);
        self.events.truncate(keep);
    }

    /// Iterate over events with `timestamp >= start`, in arrival order
    ///
    /// The iterator borrows the log and can be cloned to restart it.
    pub fn snapshot_since(&self, start: Instant) -> std::slice::Iter<'_, KeyEvent> {
        self.events[self.first_index_at(start)..].iter()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every event
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn first_index_at(&self, instant: Instant) -> usize {
        self.events.partition_point(|e| e.timestamp < instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn log_at(base: Instant, offsets_ms: &[(&str, u64)]) -> EventLog {
        let mut log = EventLog::new();
        for (key, ms) in offsets_ms {
            log.append(KeyEvent::new(*key, base + Duration::from_millis(*ms)));
        }
        log
    }

    #[test]
    fn test_append_and_len() {
        let log = log_at(Instant::now(), &[("a", 0), ("b", 10)]);
        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_truncate_from_is_inclusive() {
        let base = Instant::now();
        let mut log = log_at(base, &[("a", 0), ("b", 10), ("c", 20)]);

        log.truncate_from(base + Duration::from_millis(10));

        let keys: Vec<&str> = log.snapshot_since(base).map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a"]);
    }

    #[test]
    fn test_truncate_before_everything_empties_log() {
        let base = Instant::now() + Duration::from_millis(5);
        let mut log = log_at(base, &[("a", 0), ("b", 10)]);
        log.truncate_from(base);
        assert!(log.is_empty());
    }

    #[test]
    fn test_snapshot_since_is_restartable() {
        let base = Instant::now();
        let log = log_at(base, &[("a", 0), ("b", 10), ("b", 15), ("c", 20)]);

        let snapshot = log.snapshot_since(base + Duration::from_millis(10));
        let first: Vec<&str> = snapshot.clone().map(|e| e.key.as_str()).collect();
        let second: Vec<&str> = snapshot.map(|e| e.key.as_str()).collect();

        assert_eq!(first, ["b", "b", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_after_last_event_is_empty() {
        let base = Instant::now();
        let log = log_at(base, &[("a", 0)]);
        assert_eq!(log.snapshot_since(base + Duration::from_secs(1)).count(), 0);
    }
}

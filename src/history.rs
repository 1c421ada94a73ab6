//! Bounded, order-preserving alert history.

use crate::event::Event;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_CAPACITY: usize = 50;

/// Most-recent-first record of classified events.
///
/// Insertion past capacity evicts the oldest entry - ring semantics by
/// insertion order, not LRU. The log lives only in memory and starts empty
/// at every collector launch.
pub struct TrafficLog {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl TrafficLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an event. Always succeeds; eviction is routine behavior, not
    /// a failure. Insert and evict happen together so the capacity bound
    /// holds after every call.
    pub fn ingest(&mut self, event: Event) {
        self.entries.push_front(event);
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Point-in-time copy of the history, newest first.
    pub fn snapshot(&self) -> Vec<Event> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle shared between the ingestion endpoint and the read endpoints.
/// All mutation goes through `ingest` under the write lock, so insertion
/// and eviction are atomic as a unit and readers never observe a
/// partially-applied ingest.
pub type SharedLog = Arc<RwLock<TrafficLog>>;

pub fn shared(capacity: usize) -> SharedLog {
    Arc::new(RwLock::new(TrafficLog::new(capacity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ThreatLabel;

    fn numbered_event(n: usize) -> Event {
        Event {
            kind: ThreatLabel::Safe,
            ip: format!("10.0.0.{}", n),
            payload: format!("UDP (9999): packet {}", n),
            timestamp: "12:00:00".to_string(),
        }
    }

    #[test]
    fn test_newest_first_order() {
        let mut log = TrafficLog::new(10);
        for n in 0..3 {
            log.ingest(numbered_event(n));
        }

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].ip, "10.0.0.2");
        assert_eq!(snapshot[2].ip, "10.0.0.0");
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut log = TrafficLog::new(5);
        for n in 0..12 {
            log.ingest(numbered_event(n));
            assert!(log.len() <= 5);
        }
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut log = TrafficLog::new(5);
        for n in 0..8 {
            log.ingest(numbered_event(n));
        }

        // Exactly events 3..=7 survive, in reverse insertion order
        let ips: Vec<String> = log.snapshot().iter().map(|e| e.ip.clone()).collect();
        assert_eq!(
            ips,
            vec!["10.0.0.7", "10.0.0.6", "10.0.0.5", "10.0.0.4", "10.0.0.3"]
        );
    }

    #[test]
    fn test_under_capacity_keeps_everything() {
        let mut log = TrafficLog::new(50);
        for n in 0..7 {
            log.ingest(numbered_event(n));
        }
        assert_eq!(log.len(), 7);
    }

    #[test]
    fn test_starts_empty() {
        let log = TrafficLog::new(50);
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
    }
}

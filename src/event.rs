//! The record flowing through the whole pipeline.

use crate::signature::ThreatLabel;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// One classified traffic observation.
///
/// Immutable once constructed: events move or clone between components,
/// they are never shared mutably. Wire shape matches the collector's
/// ingestion contract: `{type, ip, payload, timestamp}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: ThreatLabel,
    pub ip: String,
    pub payload: String,
    pub timestamp: String,
}

impl Event {
    /// Build a record from a classified payload unit, stamping the current
    /// local time. The payload field carries the protocol label so the feed
    /// can show where the traffic arrived.
    pub fn new(kind: ThreatLabel, source: &str, protocol: &str, text: &str) -> Self {
        Self {
            kind,
            ip: source.to_string(),
            payload: format!("{}: {}", protocol, text),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let event = Event {
            kind: ThreatLabel::SqlInjection,
            ip: "203.0.113.7".to_string(),
            payload: "HTTP (8080): URL: /login | UA: curl".to_string(),
            timestamp: "12:00:00".to_string(),
        };

        let json = serde_json::to_string(&event).expect("serializes");
        assert!(json.contains(r#""type":"SQL INJECTION""#));
        assert!(json.contains(r#""ip":"203.0.113.7""#));

        let back: Event = serde_json::from_str(&json).expect("round-trips");
        assert_eq!(back.kind, ThreatLabel::SqlInjection);
        assert_eq!(back.ip, event.ip);
    }

    #[test]
    fn test_payload_carries_protocol_label() {
        let event = Event::new(ThreatLabel::Safe, "10.0.0.1", "UDP (9999)", "ping");
        assert_eq!(event.payload, "UDP (9999): ping");
        assert!(!event.timestamp.is_empty());
    }
}

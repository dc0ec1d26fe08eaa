use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Outbound frame on the `/location` channel.
///
/// The stream multiplexes logical per-manifest channels over one
/// connection; `joinManifest` / `leaveManifest` select which manifests
/// this connection receives events for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ChannelCommand {
    #[serde(rename = "joinManifest")]
    JoinManifest(String),
    #[serde(rename = "leaveManifest")]
    LeaveManifest(String),
}

/// Inbound frame on the `/location` channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ChannelEvent {
    #[serde(rename = "locationUpdated")]
    LocationUpdated(LocationUpdatedPayload),
}

/// Payload of a `locationUpdated` event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdatedPayload {
    pub manifest_id: String,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

/// A location event as delivered to polling clients, stamped with a
/// per-process sequence number so a poller can ask only for news.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationPing {
    pub seq: u64,
    pub manifest_id: String,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_command_wire_shape() {
        let cmd = ChannelCommand::JoinManifest("M1".into());
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"event":"joinManifest","data":"M1"}"#);
    }

    #[test]
    fn location_updated_round_trip() {
        let raw = r#"{
            "event": "locationUpdated",
            "data": {
                "manifestId": "M1",
                "location": {"latitude": 40.7, "longitude": -74.0, "address": "Newark"},
                "recordedAt": "2026-03-02T18:04:00Z"
            }
        }"#;
        let evt: ChannelEvent = serde_json::from_str(raw).unwrap();
        let ChannelEvent::LocationUpdated(payload) = evt;
        assert_eq!(payload.manifest_id, "M1");
        assert_eq!(payload.location.longitude, -74.0);
        assert_eq!(payload.recorded_at.as_deref(), Some("2026-03-02T18:04:00Z"));
    }

    #[test]
    fn unknown_event_fails_to_parse() {
        let raw = r#"{"event":"somethingElse","data":{}}"#;
        assert!(serde_json::from_str::<ChannelEvent>(raw).is_err());
    }
}

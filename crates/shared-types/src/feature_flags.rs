use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Live location channel (WebSocket to the backend's /location stream).
    #[serde(default)]
    pub live_updates: bool,
    /// Address autocomplete and reverse geocoding via the public lookup
    /// service.
    #[serde(default)]
    pub geocoding: bool,
    #[serde(default)]
    pub telemetry: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_all_false() {
        let flags = FeatureFlags::default();
        assert!(!flags.live_updates);
        assert!(!flags.geocoding);
        assert!(!flags.telemetry);
    }

    #[test]
    fn deserialize_json_with_missing_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }

    #[test]
    fn serialize_roundtrip() {
        let flags = FeatureFlags {
            live_updates: true,
            geocoding: false,
            telemetry: true,
        };
        let json = serde_json::to_string(&flags).unwrap();
        let deserialized: FeatureFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(flags, deserialized);
    }
}

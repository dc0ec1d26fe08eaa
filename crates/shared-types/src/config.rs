use serde::{Deserialize, Serialize};

use crate::FeatureFlags;

/// Connection settings for the external fleet backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// REST base URL, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// WebSocket base URL for the live location stream. Defaults to
    /// `base_url` with the scheme swapped to `ws`.
    #[serde(default)]
    pub ws_url: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_url: None,
        }
    }
}

impl BackendConfig {
    /// The effective WebSocket URL: explicit `ws_url`, or `base_url` with
    /// `http`/`https` rewritten to `ws`/`wss`.
    pub fn ws_url(&self) -> String {
        match &self.ws_url {
            Some(url) => url.clone(),
            None => {
                if let Some(rest) = self.base_url.strip_prefix("https://") {
                    format!("wss://{rest}")
                } else if let Some(rest) = self.base_url.strip_prefix("http://") {
                    format!("ws://{rest}")
                } else {
                    self.base_url.clone()
                }
            }
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:3001");
        assert_eq!(config.features, FeatureFlags::default());
    }

    #[test]
    fn partial_toml_keeps_missing_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://fleet-api.internal"

            [features]
            live_updates = true
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://fleet-api.internal");
        assert!(config.features.live_updates);
        assert!(!config.features.geocoding);
    }

    #[test]
    fn ws_url_derived_from_base_url() {
        let backend = BackendConfig {
            base_url: "https://fleet-api.internal".into(),
            ws_url: None,
        };
        assert_eq!(backend.ws_url(), "wss://fleet-api.internal");

        let backend = BackendConfig {
            base_url: "http://localhost:3001".into(),
            ws_url: None,
        };
        assert_eq!(backend.ws_url(), "ws://localhost:3001");
    }

    #[test]
    fn explicit_ws_url_wins() {
        let backend = BackendConfig {
            base_url: "http://localhost:3001".into(),
            ws_url: Some("ws://stream.internal:9000".into()),
        };
        assert_eq!(backend.ws_url(), "ws://stream.internal:9000");
    }
}

use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml`, apply environment overrides, and store the result in
/// the global `OnceLock`. Safe to call multiple times — only the first call
/// has effect.
///
/// If the file is missing or unparseable, defaults apply (all feature flags
/// off, backend at `http://localhost:3001`).
///
/// Environment overrides (read after `dotenvy`):
///   - `BACKEND_API_URL` — REST base URL
///   - `BACKEND_WS_URL` — live-stream base URL
pub fn load_config() {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str::<AppConfig>(&contents).unwrap_or_else(|e| {
                eprintln!("[config] Failed to parse {CONFIG_PATH}: {e} — using defaults");
                AppConfig::default()
            }),
            Err(e) => {
                eprintln!("[config] {CONFIG_PATH} not found ({e}) — using defaults");
                AppConfig::default()
            }
        };

        if let Ok(url) = std::env::var("BACKEND_API_URL") {
            if !url.is_empty() {
                config.backend.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(url) = std::env::var("BACKEND_WS_URL") {
            if !url.is_empty() {
                config.backend.ws_url = Some(url);
            }
        }

        eprintln!(
            "[config] Backend: {} — flags: {:?}",
            config.backend.base_url, config.features
        );
        config
    });
}

/// Get the loaded config. Returns defaults if `load_config()` hasn't been
/// called yet (safe fallback).
pub fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

/// Shorthand for the loaded feature flags.
pub fn feature_flags() -> &'static FeatureFlags {
    &config().features
}

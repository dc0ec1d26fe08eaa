use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the tracing subscriber. Safe to call multiple times — only the
/// first call has effect.
///
/// Filtering comes from `RUST_LOG`, defaulting to info for this workspace
/// and warn elsewhere.
pub fn init_telemetry() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,server=info,app=info,tower_http=info")
        });

        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();

        // A subscriber may already be installed by the hosting runtime;
        // that is not an error worth failing startup over.
        if let Err(e) = result {
            eprintln!("[telemetry] Subscriber already installed: {e}");
        }
    });
}

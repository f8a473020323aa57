//! Logging setup for the binary.
//!
//! Logs always go to stderr so that stdout only carries the report. The
//! subscriber is installed once the config file is merged, so `output.verbose`
//! and `output.no_color` apply as well as their flags.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::EffectiveConfig;

/// Default filter when `RUST_LOG` is unset.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

pub fn init_telemetry(effective: &EffectiveConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(effective.verbose)));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!effective.no_color)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Telemetry initialized");
}

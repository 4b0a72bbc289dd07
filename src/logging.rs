//! Structured logging setup for host builds.
//!
//! The controller emits `tracing` events (state transitions, carrier
//! edges, the startup report). On the ESP32 those go to whatever
//! subscriber the firmware installs; on the host this module wires up a
//! stderr subscriber with `RUST_LOG`-style filtering.
//!
//! # Example
//!
//! ```rust
//! rs_repeater::logging::init();
//! tracing::info!("repeater controller starting");
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global logging subscriber at `info` level.
///
/// Reads the `RUST_LOG` environment variable for per-module filtering.
/// Should be called once at startup; subsequent calls are silently
/// ignored.
pub fn init() {
    init_with_default("info");
}

/// Initialize the global logging subscriber with a fallback filter.
///
/// `default_filter` applies when `RUST_LOG` is not set, e.g.
/// `"rs_repeater=debug"`.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false));

    // Ignore error if a subscriber was already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

//! Logging setup for the `veduta` binary.
//!
//! The library itself only emits `tracing` events; embedders install whatever
//! subscriber suits them. The CLI calls [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, honouring `RUST_LOG` and defaulting to
/// warnings only. Calling this twice is harmless; the second call is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

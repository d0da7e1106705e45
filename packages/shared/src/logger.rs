//! Tracing subscriber setup shared by the Chime binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `name` is the binary name (crate directives like `chime_server=debug` are
/// derived from it), `default_level` applies when `RUST_LOG` is not set.
/// Calling this more than once is a no-op, so test harnesses can call it
/// freely.
pub fn setup_logger(name: &str, default_level: &str) {
    let directive = format!("{}={}", name.replace('-', "_"), default_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    tracing::debug!("Logger initialized for '{}'", name);
}

// ============================================================================
// Logging
// Subscriber setup for binaries and demos
// ============================================================================

use tracing_subscriber::{fmt, EnvFilter};

/// Directives used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Calling it twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Like [`init_logging`] with a caller-chosen fallback filter.
pub fn init_logging_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

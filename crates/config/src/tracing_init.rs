use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with env-based filtering.
///
/// Reads `RUST_LOG` (or `LOG_LEVEL`) to set the filter.
/// Defaults to `default_level` if neither is set. Returns `false` when a
/// global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

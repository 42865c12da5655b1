// ABOUTME: Diagnostic logging setup — tracing subscriber writing to stderr.
// ABOUTME: RUST_LOG wins over the configured level when set.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter: RUST_LOG if set and valid, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(config: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

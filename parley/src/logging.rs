//! Process-wide logging, driven by `core.logging_level`.

use pconfig::LogLevel;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call is a no-op so tests can
/// initialize repeatedly.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parley={}", level.as_str())));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

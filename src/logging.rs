//! Logging setup
//!
//! Diagnostics go to stderr so stdout stays clean for reports and `--json`.
//! The filter comes from `MOODJOUR_LOG`, then `RUST_LOG`, then `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MOODJOUR_LOG";

const DEFAULT_LEVEL: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize the global subscriber; later calls are no-ops
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Initialize logging for tests (captured by the test harness)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! Logging setup for the command line driver

use tracing_subscriber::EnvFilter;

/// The filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initializes logging to stderr. The level can be configured through the `RUST_LOG` environment
/// variable.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

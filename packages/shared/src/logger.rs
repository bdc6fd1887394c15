//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when it is set; otherwise every target logs at
/// `default_level`. Calling this twice (e.g. from several tests) is a no-op.
///
/// # Arguments
///
/// * `bin_name` - Name of the running binary, logged once at startup
/// * `default_level` - Level used when `RUST_LOG` is not set (`"info"`, `"debug"`, ...)
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logger initialized for '{}'", bin_name);
    }
}

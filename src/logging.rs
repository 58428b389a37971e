//! Tracing subscriber setup
//!
//! Log events go to stderr so that decoded payloads written to stdout stay
//! clean. `RUST_LOG` wins over everything else.

use tracing_subscriber::EnvFilter;

use crate::error::{WheelboardError, WheelboardResult};

/// Pick the filter directive for a configured level and `-v` count
pub fn filter_directive(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns a config error if the level is not a valid filter or a
/// subscriber is already installed.
pub fn init_logging(configured: &str, verbosity: u8) -> WheelboardResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(configured, verbosity))
            .map_err(|e| WheelboardError::Config(format!("Invalid log level: {}", e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| WheelboardError::Config(format!("Failed to initialise logging: {}", e)))
}

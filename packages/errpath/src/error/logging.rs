//! Logging bootstrap and chain reporting
//!
//! The crate itself only emits through the `log` facade. This module sets up
//! `env_logger` for binaries and tests and reports whole chains at error level.
//! Levels follow `RUST_LOG`, e.g. `RUST_LOG=errpath=debug`.

use super::types::Error;
use log::{error, info, warn};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and error-chain reporting
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("error chain logging initialized");
        });
    }

    /// Initialize logging for tests, tolerating repeated calls
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the console summary of a chain at error level
    pub fn log_error(err: &Error) {
        error!("{}", err.summarize_console());
    }

    /// Log the JSON record of a chain at error level
    pub fn log_error_json(err: &Error) {
        match err.to_json_string() {
            Ok(json) => error!("{json}"),
            Err(e) => {
                warn!("error chain could not be serialized ({e}), logging text instead");
                error!("{err}");
            }
        }
    }

    /// Log a chain at warn level when its class hints a retry may succeed.
    ///
    /// Returns whether the chain was treated as recoverable.
    pub fn log_recoverable(err: &Error) -> bool {
        if err.class().is_recoverable() {
            warn!("recoverable {}: {err}", err.class());
            true
        } else {
            Self::log_error(err);
            false
        }
    }
}

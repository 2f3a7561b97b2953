//! # Observability Infrastructure
//!
//! Structured logging for the library and the command line tool. The library
//! only emits `tracing` events; installing a subscriber is left to the binary.

pub mod logging;

pub use logging::{env_filter, init_logging, log_config_info};

use crate::config::Config;
use crate::errors::Result;
use ::tracing::{debug, info};

/// Initialize logging from the application configuration.
pub fn init_observability(config: &Config) -> Result<()> {
    if init_logging(&config.logging)? {
        info!(
            log_level = %config.logging.log_level,
            json_logging = %config.logging.json_logging,
            "Logging initialized"
        );
    } else {
        debug!("Global subscriber already installed; keeping it");
    }
    Ok(())
}

//! # Configuration Management
//!
//! Runtime settings for the `meshapi` command line tool. Every value comes from
//! a `MESHAPI_*` environment variable with a default when the variable is
//! unset; command line flags override what the environment provides.
//!
//! | variable                | default | meaning                          |
//! |-------------------------|---------|----------------------------------|
//! | `MESHAPI_LOG_LEVEL`     | `info`  | trace, debug, info, warn, error  |
//! | `MESHAPI_LOG_JSON`      | `false` | JSON log lines                   |
//! | `MESHAPI_OUTPUT_PRETTY` | `true`  | indent JSON output               |
//!
//! `RUST_LOG`, when set, replaces the filter built from `MESHAPI_LOG_LEVEL`.

pub mod settings;

pub use settings::{LoggingConfig, OutputConfig, LOG_LEVELS};

use validator::Validate;

use crate::errors::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self { logging: LoggingConfig::from_env(), output: OutputConfig::from_env() };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.logging
            .validate()
            .map_err(|e| Error::config(format!("Invalid logging configuration: {}", e)))?;
        self.output
            .validate()
            .map_err(|e| Error::config(format!("Invalid output configuration: {}", e)))?;
        Ok(())
    }

    /// Raise the log level to `debug` unless something more verbose is set.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose && !matches!(self.logging.log_level.as_str(), "trace" | "debug") {
            self.logging.log_level = "debug".to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("MESHAPI_LOG_LEVEL");
        env::remove_var("MESHAPI_LOG_JSON");
        env::remove_var("MESHAPI_OUTPUT_PRETTY");
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.logging.log_level, "info");
        assert!(!config.logging.json_logging);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MESHAPI_LOG_LEVEL", "WARN");
        env::set_var("MESHAPI_LOG_JSON", "1");
        env::set_var("MESHAPI_OUTPUT_PRETTY", "false");

        let config = Config::from_env().unwrap();
        assert_eq!(config.logging.log_level, "warn");
        assert!(config.logging.json_logging);
        assert!(!config.output.pretty);

        clear_env();
    }

    #[test]
    fn test_invalid_log_level_is_config_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MESHAPI_LOG_LEVEL", "chatty");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        clear_env();
    }

    #[test]
    fn test_unparsable_pretty_falls_back_to_default() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MESHAPI_OUTPUT_PRETTY", "sometimes");

        assert!(Config::from_env().unwrap().output.pretty);

        clear_env();
    }

    #[test]
    fn test_with_verbose() {
        let config = Config::default().with_verbose(true);
        assert_eq!(config.logging.log_level, "debug");

        let mut trace = Config::default();
        trace.logging.log_level = "trace".into();
        assert_eq!(trace.with_verbose(true).logging.log_level, "trace");

        assert_eq!(Config::default().with_verbose(false).logging.log_level, "info");
    }
}

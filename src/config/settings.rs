//! Individual configuration sections, each loadable from the environment.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Log levels accepted by `MESHAPI_LOG_LEVEL`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(
        length(min = 1, message = "Log level cannot be empty"),
        custom(function = "validate_log_level")
    )]
    pub log_level: String,

    /// Emit one JSON object per log line instead of the human-readable format
    pub json_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let log_level = std::env::var("MESHAPI_LOG_LEVEL")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let json_logging = std::env::var("MESHAPI_LOG_JSON")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(false);

        Self { log_level, json_logging }
    }
}

/// Output formatting for re-encoded records
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Indent JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl OutputConfig {
    pub fn from_env() -> Self {
        let pretty = std::env::var("MESHAPI_OUTPUT_PRETTY")
            .ok()
            .and_then(|s| parse_bool(&s))
            .unwrap_or(true);

        Self { pretty }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn validate_log_level(level: &str) -> Result<(), validator::ValidationError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("log_level");
        err.message = Some(format!("Unknown log level '{}'", level).into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.log_level, "info");
        assert!(!logging.json_logging);
        assert!(OutputConfig::default().pretty);
    }

    #[test]
    fn test_log_level_validation() {
        assert!(LoggingConfig::default().validate().is_ok());

        let bad = LoggingConfig { log_level: "loud".into(), json_logging: false };
        assert!(bad.validate().is_err());

        let empty = LoggingConfig { log_level: String::new(), json_logging: false };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

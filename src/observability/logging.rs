//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.
//!
//! In JSON mode every event is one JSON object per line with the span fields
//! attached, so codec spans (`kind`, `from`, `to`) can be searched by value.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::errors::{Error, Result};

/// Create a tracing span around a codec conversion.
///
/// ```rust,ignore
/// let span = codec_span!("destination-rule", "json", "binary");
/// ```
#[macro_export]
macro_rules! codec_span {
    ($kind:expr, $from:expr, $to:expr) => {
        tracing::info_span!("codec_conversion", kind = %$kind, from = %$from, to = %$to)
    };
    ($kind:expr, $from:expr, $to:expr, $($field:tt)*) => {
        tracing::info_span!(
            "codec_conversion",
            kind = %$kind,
            from = %$from,
            to = %$to,
            $($field)*
        )
    };
}

/// Build the filter directive: `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .map_err(|e| Error::config(format!("Invalid RUST_LOG directive: {}", e))),
        _ => EnvFilter::try_new(&config.log_level)
            .map_err(|e| Error::config(format!("Invalid log level: {}", e))),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays free for
/// converted records.
///
/// Returns `Ok(false)` when a subscriber was already installed (integration
/// tests, embedding applications).
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if config.json_logging {
        builder.json().with_current_span(true).try_init().is_ok()
    } else {
        builder.with_target(false).try_init().is_ok()
    };
    Ok(installed)
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::Config) {
    tracing::info!(
        log_level = %config.logging.log_level,
        json_logging = %config.logging.json_logging,
        pretty_output = %config.output.pretty,
        "meshapi configuration"
    );
}

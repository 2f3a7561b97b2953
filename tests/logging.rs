//! Global subscriber installation.

use meshapi::config::Config;
use meshapi::observability::{init_logging, init_observability};

#[test]
fn init_is_idempotent() {
    let config = Config::default();
    assert!(init_observability(&config).is_ok());
    assert!(init_observability(&config).is_ok());
    // the first call already installed the global subscriber
    assert!(!init_logging(&config.logging).unwrap());
}

//! # Runtime Configuration Module
//!
//! Environment-driven settings for the front controller process.
//!
//! ## Environment Variables
//!
//! ### `FRONTCTL_SLOW_DISPATCH_MS`
//!
//! A dispatch (match + middleware + handler) taking longer than this many
//! milliseconds is logged at `WARN`. Default: `5`.
//!
//! ### `FRONTCTL_LOG_FORMAT`
//!
//! `json` for production log shipping, `pretty` for a terminal. Default: `pretty`.
//!
//! ### `FRONTCTL_LOG_LEVEL`
//!
//! Filter used when `RUST_LOG` is not set. Default: `info`.
//!
//! Unparseable values fall back to the defaults.
//!
//! ## Usage
//!
//! ```rust
//! use frontctl::config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("slow dispatch threshold: {:?}", config.slow_dispatch_threshold);
//! ```

use std::env;
use std::time::Duration;

use crate::telemetry::LogFormat;

const DEFAULT_SLOW_DISPATCH_MS: u64 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Dispatches slower than this are logged as warnings
    pub slow_dispatch_threshold: Duration,
    /// Output format for the log subscriber
    pub log_format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_dispatch_threshold: Duration::from_millis(DEFAULT_SLOW_DISPATCH_MS),
            log_format: LogFormat::Pretty,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let slow_dispatch_threshold = lookup("FRONTCTL_SLOW_DISPATCH_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.slow_dispatch_threshold);

        let log_format = lookup("FRONTCTL_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(defaults.log_format);

        let log_level = lookup("FRONTCTL_LOG_LEVEL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_level);

        Self {
            slow_dispatch_threshold,
            log_format,
            log_level,
        }
    }
}

//! Logging setup for the `sfumato` binary.

use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Emit JSON lines instead of human-readable text
    pub json_logs: bool,
    /// Include the module target in each line
    pub with_target: bool,
}

impl LoggingConfig {
    /// Configuration at `info`, or `RUST_LOG` when set.
    pub fn new() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
            with_target: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Include module targets.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Level filter for this configuration.
    ///
    /// `RUST_LOG` wins over [`log_level`](Self::log_level) when it parses.
    pub fn filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error>> {
        Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.log_level))?)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if the level filter does not parse or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = config.filter()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_level(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

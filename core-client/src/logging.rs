//! # Logging Initialization
//!
//! Configures the `tracing-subscriber` pipeline for host applications that
//! do not bring their own subscriber. Filtering uses the standard env-filter
//! directive syntax (`info`, `core_auth=debug`, ...), with the `RUST_LOG`
//! environment variable taking precedence over the configured default.
//!
//! Credential and token values never reach the log stream: the core skips
//! secret-bearing fields in its spans and redacts them from `Debug` output.
//!
//! ## Usage
//!
//! ```
//! use core_client::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default().with_format(LogFormat::Compact);
//! // Ignore the error if the host already installed a subscriber.
//! let _ = init_logging(config);
//! tracing::info!("client starting");
//! ```

use thiserror::Error;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Compact format for production
    Compact,
    /// Structured JSON format for machine parsing
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Default filter directive, overridden by `RUST_LOG` when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Logging could not be initialized.
#[derive(Debug, Error)]
#[error("failed to initialize logging: {0}")]
pub struct InitLoggingError(String);

/// Install the global tracing subscriber.
///
/// Fails when the filter directive is invalid or another subscriber is
/// already installed (hosts that configure their own logging should simply
/// not call this).
pub fn init_logging(config: LoggingConfig) -> Result<(), InitLoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|error| InitLoggingError(error.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
    .map_err(|error| InitLoggingError(error.to_string()))
}

//! Logging setup
//!
//! Structured `tracing` output to stderr, either human-readable or JSON lines.

mod logging;

pub use logging::{DEFAULT_LOG_FILTER, LoggingConfig, TelemetryError, init_logging};
